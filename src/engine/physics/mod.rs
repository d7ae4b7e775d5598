// 2D rigid-body physics: broad phase, narrow phase, integration and response

mod body;
mod collision;
mod commands;
mod config;
mod debug;
mod handle;
mod resolver;
mod shape;
mod solver;
mod spatial_hash;
mod world;

pub use body::{presets, BodyType, RigidBody};
pub use collision::{
    circle_vs_circle, circle_vs_rectangle, detect_collision, rectangle_vs_rectangle, Collision,
    Contact,
};
pub use commands::{BodyCommand, CommandQueue};
pub use config::{CorrectionSettings, PhysicsConfig, PhysicsError};
pub use debug::{DebugRenderer, DebugVertex};
pub use handle::{BodyHandle, BodyPair, BodySet};
pub use resolver::resolve_contact;
pub use shape::{Aabb, Shape};
pub use solver::{IntegrationMethod, Integrator, LeapFrogIntegrator, VerletIntegrator};
pub use spatial_hash::SpatialHash;
pub use world::{CollisionCallback, DebugData, PhysicsWorld, StepStats};
