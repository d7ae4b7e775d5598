//! 2D rigid-body physics core.
//!
//! Bodies live in a [`PhysicsWorld`](engine::physics::PhysicsWorld). Each
//! `update(dt)` rebuilds a uniform-grid broad phase, confirms contacts per
//! shape pair, integrates motion with Verlet or LeapFrog, then resolves the
//! contacts with impulses and positional correction. Rendering, input and
//! frame timing are left to the caller, which reads body positions and
//! rotations after each step.

pub mod common;
pub mod engine;
