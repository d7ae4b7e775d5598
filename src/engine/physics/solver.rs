// Numerical integrators for body motion

use super::body::RigidBody;
use glam::Vec2;

/// Selects which integrator a world uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntegrationMethod {
    /// Position Verlet: position is driven by `prev_position`
    #[default]
    Verlet,
    /// Symplectic half-step velocity/position update
    LeapFrog,
}

impl IntegrationMethod {
    /// Build the integrator for this method
    pub fn integrator(self) -> Box<dyn Integrator> {
        match self {
            IntegrationMethod::Verlet => Box::new(VerletIntegrator),
            IntegrationMethod::LeapFrog => Box::new(LeapFrogIntegrator),
        }
    }
}

/// Advances a body's motion by one timestep
///
/// Implementations skip static and inactive bodies, add gravity as a force,
/// and clear the force accumulators once they are consumed.
pub trait Integrator {
    /// The method this integrator implements
    fn method(&self) -> IntegrationMethod;

    /// Update linear position and velocity from `acceleration`
    fn advance_linear(&self, body: &mut RigidBody, acceleration: Vec2, dt: f32);

    /// Advance one body by `dt` under `gravity` plus its accumulated forces
    fn integrate(&self, body: &mut RigidBody, gravity: Vec2, dt: f32) {
        if body.is_static() || !body.active {
            return;
        }

        body.apply_force(gravity * body.mass());
        let acceleration = body.force() * body.inv_mass();

        self.advance_linear(body, acceleration, dt);

        // Explicit Euler for the angular part
        let angular_acceleration = body.torque() * body.inv_inertia();
        body.angular_velocity += angular_acceleration * dt;
        body.rotation += body.angular_velocity * dt;

        body.clear_forces();
    }
}

/// Position Verlet integration
///
/// Velocity is still updated but only for callers reading it; position comes
/// from the previous two positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerletIntegrator;

impl Integrator for VerletIntegrator {
    fn method(&self) -> IntegrationMethod {
        IntegrationMethod::Verlet
    }

    fn advance_linear(&self, body: &mut RigidBody, acceleration: Vec2, dt: f32) {
        let old_position = body.position;

        body.velocity += acceleration * dt;
        body.position = 2.0 * body.position - body.prev_position + acceleration * dt * dt;
        body.prev_position = old_position;
    }
}

/// LeapFrog (kick-drift-kick) integration
///
/// Does not maintain `prev_position`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeapFrogIntegrator;

impl Integrator for LeapFrogIntegrator {
    fn method(&self) -> IntegrationMethod {
        IntegrationMethod::LeapFrog
    }

    fn advance_linear(&self, body: &mut RigidBody, acceleration: Vec2, dt: f32) {
        let half_dt = dt * 0.5;

        body.velocity += acceleration * half_dt;
        body.position += body.velocity * dt;
        body.velocity += acceleration * half_dt;
    }
}
