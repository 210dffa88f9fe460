//! N-body gravity simulation core
//!
//! A [`World`](world::World) owns a set of massive spheres in 2D or 3D
//! space and advances them one discrete step at a time: collisions are
//! resolved (merge or bounce), gravity kicks the remaining bodies, then
//! every body drifts. Rendering, input and timing live outside the crate;
//! callers drive [`World::step`](world::World::step) and read back
//! [`World::snapshot`](world::World::snapshot).
//!
//! The engine is single-threaded and synchronous. It performs no I/O and
//! reads no clocks, so a step is fully determined by the bodies, `dt` and
//! the world configuration.

pub mod body;
pub mod body_state;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod snapshot;
pub mod vector;
pub mod world;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod proptest_physics;

pub use error::{Result, SimError};
pub use vector::{Dimension, Vector};
pub use world::{BodySpec, World, create_world};
