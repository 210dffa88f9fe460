//! Direct N-body gravity (O(N²) implementation)

use crate::body::Body;
use crate::error::Result;
use crate::forces::ForceModel;
use crate::vector::Vector;

/// Pairwise Newtonian gravity summed over every live body
///
/// # Examples
///
/// ```
/// use gravity::body::{Body, BodyId};
/// use gravity::body_state::classify;
/// use gravity::forces::{DirectGravity, ForceModel};
/// use gravity::vector::Vector;
///
/// let state = classify(1.0, 0.1, 0.0).unwrap();
/// let bodies = vec![
///     Body::new(BodyId(0), state.clone(), Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0), 0.0, "a").unwrap(),
///     Body::new(BodyId(1), state, Vector::planar(1.0, 0.0), Vector::planar(0.0, 0.0), 0.0, "b").unwrap(),
/// ];
///
/// let gravity = DirectGravity::new(1.0);
/// let force = gravity.force_on(0, &bodies, &[false, false]).unwrap();
///
/// // Pulled toward the second body (positive x)
/// assert!(force.components()[0] > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    pub gravitational_constant: f64,
}

impl DirectGravity {
    pub fn new(gravitational_constant: f64) -> Self {
        Self {
            gravitational_constant,
        }
    }
}

impl ForceModel for DirectGravity {
    fn force_on(&self, idx: usize, bodies: &[Body], excluded: &[bool]) -> Result<Vector> {
        let body = &bodies[idx];

        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx && !excluded.get(*i).copied().unwrap_or(false))
            .try_fold(Vector::zeros(body.dimension()), |mut total, (_, other)| -> Result<Vector> {
                total.accumulate(&body.gravitational_force_from(other, self.gravitational_constant)?)?;
                Ok(total)
            })
    }

    fn potential_energy(&self, bodies: &[Body]) -> Result<f64> {
        // Each pair counted once; coincident pairs contribute nothing
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let r = a.distance_to(b)?;
                if r > 0.0 {
                    energy -= self.gravitational_constant * a.mass() * b.mass() / r;
                }
            }
        }
        Ok(energy)
    }
}
