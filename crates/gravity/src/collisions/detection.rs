//! Overlap detection between bodies

use crate::body::{Body, BodyId};
use crate::error::Result;

/// A detected overlap between two bodies
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Body whose scan found the contact
    pub body_a: BodyId,
    /// Partner body
    pub body_b: BodyId,
    /// Center-to-center distance at detection time
    pub separation: f64,
    /// Sum of the two radii
    pub collision_radius: f64,
}

impl CollisionEvent {
    fn between(a: &Body, b: &Body) -> Result<Self> {
        Ok(Self {
            body_a: a.id,
            body_b: b.id,
            separation: a.distance_to(b)?,
            collision_radius: a.radius() + b.radius(),
        })
    }
}

/// First partner that `bodies[idx]` overlaps, in body order
///
/// Bodies flagged in `excluded` (indexed like `bodies`) are never partners.
/// Returns the partner's index together with the event.
pub fn first_contact(
    bodies: &[Body],
    idx: usize,
    excluded: &[bool],
) -> Result<Option<(usize, CollisionEvent)>> {
    let body = &bodies[idx];

    for (j, other) in bodies.iter().enumerate() {
        if j == idx || excluded.get(j).copied().unwrap_or(false) {
            continue;
        }
        if body.collides_with(other)? {
            return Ok(Some((j, CollisionEvent::between(body, other)?)));
        }
    }

    Ok(None)
}

/// Every overlapping pair, each reported once with the lower index as `body_a`
///
/// Read-only; nothing is resolved.
///
/// # Examples
///
/// ```
/// use gravity::body::{Body, BodyId};
/// use gravity::body_state::classify;
/// use gravity::collisions::detect_contacts;
/// use gravity::vector::Vector;
///
/// let state = classify(1.0, 1.0, 0.0).unwrap();
/// let at = |id, x| Body::new(BodyId(id), state.clone(), Vector::planar(x, 0.0), Vector::planar(0.0, 0.0), 0.0, "b").unwrap();
///
/// let bodies = vec![at(0, 0.0), at(1, 1.5), at(2, 10.0)];
/// let contacts = detect_contacts(&bodies).unwrap();
///
/// assert_eq!(contacts.len(), 1);
/// assert_eq!(contacts[0].body_b, BodyId(1));
/// ```
pub fn detect_contacts(bodies: &[Body]) -> Result<Vec<CollisionEvent>> {
    let mut events = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if a.collides_with(b)? {
                events.push(CollisionEvent::between(a, b)?);
            }
        }
    }
    Ok(events)
}
