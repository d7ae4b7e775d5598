use super::shape::{Aabb, Shape};
use crate::common::math::cross;
use glam::Vec2;

/// Mass used when a dynamic body is created with a non-positive or non-finite mass
pub const DEFAULT_MASS: f32 = 1.0;

/// Default bounciness for new bodies
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Default friction coefficient for new bodies
pub const DEFAULT_FRICTION: f32 = 0.2;

/// How a body takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Immovable: infinite mass, never displaced by integration or impulses
    Static,
    /// Moved by forces, gravity and collision response
    Dynamic,
}

/// Physical state of a single simulated body
///
/// Mass properties and the shape are fixed at construction; kinematic state
/// (position, velocity, rotation) is public so callers can seed or read it.
#[derive(Debug, Clone)]
pub struct RigidBody {
    body_type: BodyType,
    shape: Shape,

    /// Optional name used in diagnostics
    pub label: Option<String>,

    /// Inactive bodies are skipped by the broad phase and the integrators
    pub active: bool,

    /// World position of the center of mass
    pub position: Vec2,

    /// Position at the previous step (drives Verlet integration only)
    pub prev_position: Vec2,

    /// Rotation in radians
    pub rotation: f32,

    /// Linear velocity
    pub velocity: Vec2,

    /// Angular velocity (radians per second)
    pub angular_velocity: f32,

    /// Bounciness in [0, 1]
    pub restitution: f32,

    /// Friction coefficient (carried for callers, unused by the resolver)
    pub friction: f32,

    mass: f32,
    inv_mass: f32,
    inertia: f32,
    inv_inertia: f32,

    force_accumulator: Vec2,
    torque_accumulator: f32,

    aabb: Aabb,
}

impl RigidBody {
    /// Create a circular body
    pub fn circle(body_type: BodyType, position: Vec2, radius: f32, mass: f32) -> Self {
        Self::with_shape(body_type, position, Shape::circle(radius), mass)
    }

    /// Create a rectangular body from its full width and height
    pub fn rectangle(body_type: BodyType, position: Vec2, size: Vec2, mass: f32) -> Self {
        Self::with_shape(body_type, position, Shape::rectangle(size), mass)
    }

    /// Create a body around an existing shape
    ///
    /// Static bodies always get zero mass and inertia, whatever `mass` says.
    pub fn with_shape(body_type: BodyType, position: Vec2, shape: Shape, mass: f32) -> Self {
        let (mass, inv_mass, inertia, inv_inertia) = match body_type {
            BodyType::Static => (0.0, 0.0, 0.0, 0.0),
            BodyType::Dynamic => {
                let mass = if mass > 0.0 && mass.is_finite() {
                    mass
                } else {
                    log::warn!(
                        "Dynamic body created with invalid mass {}, using {}",
                        mass,
                        DEFAULT_MASS
                    );
                    DEFAULT_MASS
                };
                let inertia = shape.moment_of_inertia(mass);
                let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
                (mass, 1.0 / mass, inertia, inv_inertia)
            }
        };

        Self {
            body_type,
            shape,
            label: None,
            active: true,
            position,
            prev_position: position,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            force_accumulator: Vec2::ZERO,
            torque_accumulator: 0.0,
            aabb: shape.aabb(position, 0.0),
        }
    }

    /// Set the initial linear velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the initial rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self.update_aabb();
        self
    }

    /// Set restitution (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set friction coefficient
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Attach a diagnostic name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Start the body active or inactive
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Static or dynamic
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Whether the body is immovable
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Whether the body responds to forces and impulses
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Collision shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Mass (0 for static bodies)
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass (0 for static bodies)
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Moment of inertia about the center of mass
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Inverse moment of inertia
    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Force accumulated since the last `clear_forces`
    pub fn force(&self) -> Vec2 {
        self.force_accumulator
    }

    /// Torque accumulated since the last `clear_forces`
    pub fn torque(&self) -> f32 {
        self.torque_accumulator
    }

    /// Cached bounding box, refreshed by `update_aabb`
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Recompute the cached bounding box from shape, position and rotation
    pub fn update_aabb(&mut self) {
        self.aabb = self.shape.aabb(self.position, self.rotation);
    }

    /// Accumulate a force through the center of mass
    pub fn apply_force(&mut self, force: Vec2) {
        self.force_accumulator += force;
    }

    /// Accumulate a force applied at a world-space point, producing torque
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2) {
        self.force_accumulator += force;
        self.torque_accumulator += cross(point - self.position, force);
    }

    /// Instantaneous change of momentum at a world-space contact point
    ///
    /// Static bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_point: Vec2) {
        if self.is_static() {
            return;
        }

        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += cross(contact_point - self.position, impulse) * self.inv_inertia;
    }

    /// Zero both accumulators (once per integration step)
    pub fn clear_forces(&mut self) {
        self.force_accumulator = Vec2::ZERO;
        self.torque_accumulator = 0.0;
    }
}

/// Common body configurations for scenes and tests
pub mod presets {
    use super::*;

    /// Create a static ground slab centered at `(x, y)`
    pub fn ground(x: f32, y: f32, width: f32, height: f32) -> RigidBody {
        RigidBody::rectangle(
            BodyType::Static,
            Vec2::new(x, y),
            Vec2::new(width, height),
            0.0,
        )
        .with_friction(0.6)
        .with_restitution(0.0)
        .with_label("ground")
    }

    /// Create a bouncy dynamic ball
    pub fn ball(x: f32, y: f32, radius: f32) -> RigidBody {
        RigidBody::circle(BodyType::Dynamic, Vec2::new(x, y), radius, 1.0)
            .with_restitution(0.8)
            .with_label("ball")
    }

    /// Create a heavy, barely bouncing dynamic crate
    pub fn crate_box(x: f32, y: f32, size: f32) -> RigidBody {
        RigidBody::rectangle(BodyType::Dynamic, Vec2::new(x, y), Vec2::splat(size), 5.0)
            .with_restitution(0.1)
            .with_friction(0.5)
            .with_label("crate")
    }
}
