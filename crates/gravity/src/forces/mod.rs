//! Force models for N-body simulations
//!
//! A [`ForceModel`] turns the current body list into a net force on one
//! body. The world divides by mass to get the acceleration it integrates.

use crate::body::Body;
use crate::error::Result;
use crate::vector::Vector;

pub mod gravity;


pub use gravity::DirectGravity;

/// A source of force on bodies in the world
pub trait ForceModel {
    /// Net force on `bodies[idx]` from every other body not flagged in `excluded`
    ///
    /// `excluded` is indexed like `bodies`; flagged bodies neither feel nor
    /// exert force.
    fn force_on(&self, idx: usize, bodies: &[Body], excluded: &[bool]) -> Result<Vector>;

    /// Potential energy of the whole body list (optional)
    fn potential_energy(&self, _bodies: &[Body]) -> Result<f64> {
        Ok(0.0)
    }
}
