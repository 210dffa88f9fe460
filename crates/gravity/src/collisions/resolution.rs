//! Collision resolution: inelastic merge or elastic bounce
//!
//! A merge conserves:
//! - Total mass
//! - Linear momentum
//! - Spin angular momentum (uniform spheres, I = 0.4 m r²)
//!
//! A bounce exchanges momentum along the contact normal only and never
//! creates or removes bodies.

use crate::body::{Body, BodyId};
use crate::body_state::classify;
use crate::error::{Result, SimError};
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// How the world resolves overlapping bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    #[default]
    Merge,
    Bounce,
}

/// Merge two bodies into a new one with id `new_id`
///
/// Position, velocity and temperature are mass-weighted averages; the radius
/// is the larger of the two. The spin keeps `0.4 (rA² mA ωA + rB² mB ωB)`
/// constant. Name, color and texture come from the larger-radius body, with
/// `a` winning a tie; a missing texture falls back to the other body's.
/// The result is selected if either input was.
///
/// A fixed body absorbs the other: the result stays fixed at the anchor's
/// position with zero velocity and keeps the anchor's name.
///
/// Fails with `MergeOverflow` when the combined mass is not representable.
///
/// # Examples
///
/// ```
/// use gravity::body::{Body, BodyId};
/// use gravity::body_state::classify;
/// use gravity::collisions::merge_bodies;
/// use gravity::vector::Vector;
///
/// let a = Body::new(BodyId(0), classify(1.0, 0.5, 0.0).unwrap(),
///     Vector::planar(1.0, 0.0), Vector::planar(0.0, 5.0), 0.0, "a").unwrap();
/// let b = Body::new(BodyId(1), classify(1.0, 0.5, 0.0).unwrap(),
///     Vector::planar(1.1, 0.0), Vector::planar(0.0, 3.0), 0.0, "b").unwrap();
///
/// let merged = merge_bodies(&a, &b, BodyId(2)).unwrap();
///
/// // Mass is conserved
/// assert!((merged.mass() - 2.0).abs() < 1e-10);
///
/// // Momentum is conserved
/// let p_initial = a.momentum().add(&b.momentum()).unwrap();
/// let p_final = merged.momentum();
/// assert!(p_final.subtract(&p_initial).unwrap().magnitude() < 1e-10);
/// ```
pub fn merge_bodies(a: &Body, b: &Body, new_id: BodyId) -> Result<Body> {
    let overflow = || SimError::MergeOverflow {
        first: a.id,
        second: b.id,
    };

    let total_mass = a.mass() + b.mass();
    if !total_mass.is_finite() {
        return Err(overflow());
    }
    // Weights instead of m·x products keep huge finite masses representable
    let (w_a, w_b) = (a.mass() / total_mass, b.mass() / total_mass);

    let position = a.position.scale(w_a).add(&b.position.scale(w_b))?;
    let velocity = a.velocity.scale(w_a).add(&b.velocity.scale(w_b))?;
    let temperature = a.temperature() * w_a + b.temperature() * w_b;
    let radius = a.radius().max(b.radius());

    // ω' = (0.4 Σ r² m ω) / (0.4 r'² M), written as a weighted sum
    let spin = (a.radius() / radius).powi(2) * w_a * a.spin
        + (b.radius() / radius).powi(2) * w_b * b.spin;

    if !(position.is_finite() && velocity.is_finite() && temperature.is_finite() && spin.is_finite()) {
        return Err(overflow());
    }

    let (larger, smaller) = if a.radius() >= b.radius() { (a, b) } else { (b, a) };
    let texture = if larger.state().texture_ref().is_empty() {
        smaller.state().texture_ref()
    } else {
        larger.state().texture_ref()
    };

    let state = classify(total_mass, radius, temperature)?
        .with_texture(texture)
        .with_color(larger.state().color());

    let anchor = match (a.fixed, b.fixed) {
        (true, _) => Some((a, b)),
        (false, true) => Some((b, a)),
        (false, false) => None,
    };

    let mut merged = match anchor {
        Some((anchor, other)) => {
            let name = if anchor.name.trim().is_empty() {
                other.name.clone()
            } else {
                anchor.name.clone()
            };
            let mut merged = Body::new(new_id, state, anchor.position, velocity, spin, name)?;
            merged.set_fixed(true);
            merged
        }
        None => Body::new(new_id, state, position, velocity, spin, larger.name.clone())?,
    };
    merged.selected = a.selected || b.selected;
    Ok(merged)
}

/// Bounce two overlapping bodies with restitution coefficient `restitution`
///
/// Works along the normal `n` from `a` toward `b`. If the bodies are
/// already separating along `n` (or share a center) nothing changes.
/// Against a fixed body the moving one reflects as `v' = -e v`; two fixed
/// bodies never bounce. Returns whether any velocity changed.
pub fn bounce_bodies(a: &mut Body, b: &mut Body, restitution: f64) -> Result<bool> {
    match (a.fixed, b.fixed) {
        (true, true) => return Ok(false),
        (false, true) => return reflect_off_anchor(a, &b.position, restitution),
        (true, false) => return reflect_off_anchor(b, &a.position, restitution),
        (false, false) => {}
    }

    let offset = b.position.subtract(&a.position)?;
    if offset.magnitude() == 0.0 {
        return Ok(false);
    }
    let normal = offset.normalize()?;

    let u1 = a.velocity.dot(&normal)?;
    let u2 = b.velocity.dot(&normal)?;
    if u1 - u2 <= 0.0 {
        return Ok(false);
    }

    let (m1, m2) = (a.mass(), b.mass());
    let e = restitution;
    let u1_after = ((m1 - e * m2) * u1 + (1.0 + e) * m2 * u2) / (m1 + m2);
    let u2_after = ((m2 - e * m1) * u2 + (1.0 + e) * m1 * u1) / (m1 + m2);

    a.velocity.accumulate(&normal.scale(u1_after - u1))?;
    b.velocity.accumulate(&normal.scale(u2_after - u2))?;
    Ok(true)
}

/// Reverses `body` off a fixed body at `anchor`, if it is approaching it
fn reflect_off_anchor(body: &mut Body, anchor: &Vector, restitution: f64) -> Result<bool> {
    let offset = anchor.subtract(&body.position)?;
    if offset.magnitude() == 0.0 {
        return Ok(false);
    }
    if body.velocity.dot(&offset.normalize()?)? <= 0.0 {
        return Ok(false);
    }
    body.velocity = body.velocity.scale(-restitution);
    Ok(true)
}
