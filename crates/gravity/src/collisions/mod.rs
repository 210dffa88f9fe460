//! Collision detection and resolution
//!
//! Detection is a direct O(N²) overlap scan. Resolution either merges the
//! pair into one new body or bounces them apart along the contact normal,
//! depending on the world's [`CollisionMode`].

pub mod detection;
pub mod resolution;


pub use detection::{CollisionEvent, detect_contacts, first_contact};
pub use resolution::{CollisionMode, bounce_bodies, merge_bodies};
