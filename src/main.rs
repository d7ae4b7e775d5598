use anyhow::Result;
use glam::Vec2;
use log::info;
use rusted_physics::engine::physics::{
    presets, BodyType, IntegrationMethod, PhysicsConfig, PhysicsWorld, RigidBody,
};
use std::cell::Cell;
use std::rc::Rc;

/// Fixed simulation rate for the headless demo
const TIMESTEP: f32 = 1.0 / 60.0;

/// Simulated duration in seconds
const DURATION: f32 = 3.0;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting physics demo...");

    let config = PhysicsConfig::default()
        .with_cell_size(4.0)
        .with_integration_method(IntegrationMethod::LeapFrog);
    let mut world = PhysicsWorld::with_config(config)?;

    // Ground and two walls
    let wall_size = Vec2::new(1.0, 10.0);
    world.add_body(presets::ground(0.0, 10.0, 40.0, 1.0));
    world.add_body(
        RigidBody::rectangle(BodyType::Static, Vec2::new(-20.0, 5.0), wall_size, 0.0)
            .with_label("left wall"),
    );
    world.add_body(
        RigidBody::rectangle(BodyType::Static, Vec2::new(20.0, 5.0), wall_size, 0.0)
            .with_label("right wall"),
    );

    let mut tracked = Vec::new();
    for i in 0..5 {
        let x = -8.0 + i as f32 * 4.0;
        tracked.push(world.add_body(presets::ball(x, 0.0, 0.5)));
        tracked.push(world.add_body(presets::crate_box(x + 1.0, -3.0, 1.0)));
    }

    // A fast projectile that disappears on its first impact
    let projectile = world.add_body(
        RigidBody::circle(BodyType::Dynamic, Vec2::new(-15.0, 2.0), 0.25, 0.2)
            .with_velocity(Vec2::new(40.0, 0.0))
            .with_label("projectile"),
    );

    let impacts = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&impacts);
    world.set_collision_callback(move |collision, commands| {
        counter.set(counter.get() + 1);
        if collision.body_a == projectile || collision.body_b == projectile {
            commands.remove(projectile);
        }
    });

    let steps = (DURATION / TIMESTEP).round() as u32;
    for step in 1..=steps {
        let stats = world.update(TIMESTEP);

        if step % 60 == 0 {
            let t = step as f32 * TIMESTEP;
            info!(
                "t = {:.1}s: {} bodies, {} candidate pairs, {} contacts",
                t, world.body_count(), stats.candidate_pairs, stats.collisions
            );
        }
    }

    for handle in tracked {
        if let Some(body) = world.get_body(handle) {
            info!(
                "{:<6} at ({:>6.2}, {:>6.2}) rot {:>5.2}",
                body.label.as_deref().unwrap_or("body"),
                body.position.x,
                body.position.y,
                body.rotation
            );
        }
    }

    info!(
        "Done: {} contacts observed, projectile {}",
        impacts.get(),
        if world.get_body(projectile).is_some() {
            "still flying"
        } else {
            "removed"
        }
    );

    Ok(())
}
