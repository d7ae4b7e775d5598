use glam::Vec2;

use super::body::RigidBody;
use super::collision::{detect_collision, Collision};
use super::commands::CommandQueue;
use super::config::{validate_cell_size, PhysicsConfig, PhysicsError};
use super::handle::{BodyHandle, BodyPair, BodySet};
use super::resolver::resolve_contact;
use super::solver::{IntegrationMethod, Integrator};
use super::spatial_hash::SpatialHash;

/// Observer invoked once per confirmed collision, before integration
///
/// The body set must not be touched from inside the callback; mutations are
/// queued on the [`CommandQueue`] and applied when `update` finishes.
pub type CollisionCallback = Box<dyn FnMut(&Collision, &mut CommandQueue)>;

/// Summary of a single `update` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Timestep actually integrated (0 when the step was skipped)
    pub dt: f32,
    /// Whether the requested timestep was clamped to the maximum
    pub clamped: bool,
    /// Pairs produced by the broad phase
    pub candidate_pairs: usize,
    /// Pairs confirmed by the narrow phase
    pub collisions: usize,
    /// Collisions that received an impulse
    pub resolved: usize,
    /// Deferred commands that took effect
    pub commands_applied: usize,
}

/// Physics world that owns all bodies and runs the simulation pipeline
pub struct PhysicsWorld {
    /// Gravity, cell size, timestep limit and correction tuning
    config: PhysicsConfig,

    /// Body storage
    bodies: BodySet,

    /// Active integration strategy
    integrator: Box<dyn Integrator>,

    /// Broad phase, rebuilt every step
    spatial_hash: SpatialHash,

    /// Optional collision observer
    collision_callback: Option<CollisionCallback>,

    /// Mutations requested by the observer during the current step
    command_queue: CommandQueue,

    /// Broad-phase output for the current step
    potential_pairs: Vec<BodyPair>,

    /// Narrow-phase output for the current step
    collisions: Vec<Collision>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::build(PhysicsConfig::default())
    }

    /// Create a world from a validated configuration
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PhysicsConfig) -> Self {
        Self {
            integrator: config.integration_method.integrator(),
            spatial_hash: SpatialHash::new(config.cell_size),
            config,
            bodies: BodySet::new(),
            collision_callback: None,
            command_queue: CommandQueue::new(),
            potential_pairs: Vec::new(),
            collisions: Vec::with_capacity(32),
        }
    }

    /// Step the simulation forward by `dt` seconds
    ///
    /// Non-positive timesteps do nothing; long ones are clamped to the
    /// configured maximum. Collisions are found on the positions at the start
    /// of the step and resolved after integration has moved the bodies.
    pub fn update(&mut self, dt: f32) -> StepStats {
        if !(dt > 0.0) {
            return StepStats::default();
        }

        let clamped = dt > self.config.max_timestep;
        let dt = if clamped {
            log::debug!(
                "Clamping timestep {:.4}s to {:.4}s",
                dt,
                self.config.max_timestep
            );
            self.config.max_timestep
        } else {
            dt
        };

        self.update_aabbs();
        self.rebuild_spatial_hash();
        self.broad_phase();
        self.narrow_phase();
        self.integrate(dt);
        let resolved = self.resolve_collisions();
        let commands_applied = self.command_queue.apply(&mut self.bodies);

        let stats = StepStats {
            dt,
            clamped,
            candidate_pairs: self.potential_pairs.len(),
            collisions: self.collisions.len(),
            resolved,
            commands_applied,
        };
        log::trace!("Physics step: {:?}", stats);

        self.collisions.clear();
        stats
    }

    /// Add a body to the world
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let label = body.label.clone();
        let handle = self.bodies.insert(body);
        log::debug!(
            "Added body {:?} ({})",
            handle,
            label.as_deref().unwrap_or("unnamed")
        );
        handle
    }

    /// Remove a body; unknown or stale handles are ignored
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let removed = self.bodies.remove(handle);
        if removed.is_some() {
            log::debug!("Removed body {:?}", handle);
        }
        removed
    }

    /// Get a reference to a body
    pub fn get_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Get a mutable reference to a body
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    /// Iterate all bodies (e.g. to read positions for rendering)
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Switch integrator
    ///
    /// Body state is left as-is. Verlet reads `prev_position`, which LeapFrog
    /// does not maintain, so switching from LeapFrog to Verlet produces a
    /// one-step jump.
    pub fn set_integration_method(&mut self, method: IntegrationMethod) {
        if self.config.integration_method == method {
            return;
        }

        log::debug!(
            "Switching integrator {:?} -> {:?}",
            self.config.integration_method,
            method
        );
        self.config.integration_method = method;
        self.integrator = method.integrator();
    }

    /// Currently selected integrator
    pub fn integration_method(&self) -> IntegrationMethod {
        self.integrator.method()
    }

    /// Set gravity for the physics world
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Replace the broad-phase grid with one of the given cell size
    pub fn set_spatial_hash_cell_size(&mut self, cell_size: f32) -> Result<(), PhysicsError> {
        validate_cell_size(cell_size)?;

        log::debug!("Spatial hash cell size set to {}", cell_size);
        self.config.cell_size = cell_size;
        self.spatial_hash = SpatialHash::new(cell_size);
        Ok(())
    }

    /// Register the collision observer, replacing any previous one
    pub fn set_collision_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Collision, &mut CommandQueue) + 'static,
    {
        self.collision_callback = Some(Box::new(callback));
    }

    /// Drop the collision observer
    pub fn clear_collision_callback(&mut self) {
        self.collision_callback = None;
    }

    /// Current configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Get references to internal components for debug rendering
    pub fn debug_data(&self) -> DebugData<'_> {
        DebugData {
            bodies: &self.bodies,
        }
    }

    fn update_aabbs(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.update_aabb();
        }
    }

    fn rebuild_spatial_hash(&mut self) {
        self.spatial_hash.clear();

        for (handle, body) in self.bodies.iter() {
            if body.active {
                self.spatial_hash.insert(handle, body.aabb());
            }
        }
    }

    fn broad_phase(&mut self) {
        self.potential_pairs = self.spatial_hash.query_all_potential_collisions();
    }

    fn narrow_phase(&mut self) {
        self.collisions.clear();

        for pair in &self.potential_pairs {
            let a = self.bodies.get(pair.first());
            let b = self.bodies.get(pair.second());
            let (Some(a), Some(b)) = (a, b) else {
                continue;
            };

            if !a.active || !b.active || (a.is_static() && b.is_static()) {
                continue;
            }

            let Some(contact) = detect_collision(a, b) else {
                continue;
            };

            let collision = Collision {
                body_a: pair.first(),
                body_b: pair.second(),
                contact,
            };
            self.collisions.push(collision);

            if let Some(callback) = self.collision_callback.as_mut() {
                callback(&collision, &mut self.command_queue);
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            self.integrator.integrate(body, gravity, dt);
        }
    }

    fn resolve_collisions(&mut self) -> usize {
        let mut resolved = 0;

        for collision in &self.collisions {
            let Some((a, b)) = self.bodies.get2_mut(collision.body_a, collision.body_b) else {
                continue;
            };
            if resolve_contact(a, b, &collision.contact, &self.config.correction) {
                resolved += 1;
            }
        }

        resolved
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Data structure for debug rendering
pub struct DebugData<'a> {
    pub bodies: &'a BodySet,
}
