//! Property-based tests for the physics core using proptest.
//!
//! These check conservation laws and vector identities over randomized
//! bodies rather than hand-picked cases.

use proptest::prelude::*;

use crate::body::{Body, BodyId};
use crate::body_state::classify;
use crate::collisions::{bounce_bodies, merge_bodies};
use crate::vector::Vector;

fn component() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn spatial() -> impl Strategy<Value = Vector> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vector::spatial(x, y, z))
}

fn body(id: u32, mass: f64, radius: f64, position: Vector, velocity: Vector) -> Body {
    let state = classify(mass, radius, 0.0).unwrap();
    Body::new(BodyId(id), state, position, velocity, 0.0, "p").unwrap()
}

fn close(a: &Vector, b: &Vector, tolerance: f64) -> bool {
    a.subtract(b).unwrap().magnitude() <= tolerance
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_add_then_subtract_recovers_vector(a in spatial(), b in spatial()) {
        let back = a.add(&b).unwrap().subtract(&b).unwrap();
        prop_assert!(close(&back, &a, 1e-9));
    }

    #[test]
    fn prop_normalize_has_unit_length(v in spatial()) {
        prop_assume!(v.magnitude() > 1e-6);
        let unit = v.normalize().unwrap();
        prop_assert!((unit.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_cross_is_orthogonal(a in spatial(), b in spatial()) {
        let c = a.cross(&b).unwrap();
        let scale = a.magnitude() * b.magnitude() * (a.magnitude() + b.magnitude()) + 1.0;
        prop_assert!(c.dot(&a).unwrap().abs() / scale < 1e-12);
        prop_assert!(c.dot(&b).unwrap().abs() / scale < 1e-12);
    }

    /// Newton's third law for the pairwise force
    #[test]
    fn prop_gravity_is_antisymmetric(
        m1 in 0.1f64..1000.0,
        m2 in 0.1f64..1000.0,
        p1 in spatial(),
        p2 in spatial(),
    ) {
        prop_assume!(p1.subtract(&p2).unwrap().magnitude() > 1e-3);
        let zero = Vector::spatial(0.0, 0.0, 0.0);
        let a = body(0, m1, 1.0, p1, zero);
        let b = body(1, m2, 1.0, p2, zero);

        let on_a = a.gravitational_force_from(&b, 6000.0).unwrap();
        let on_b = b.gravitational_force_from(&a, 6000.0).unwrap();
        let tolerance = on_a.magnitude() * 1e-12 + 1e-12;
        prop_assert!(close(&on_a, &-on_b, tolerance));
    }

    #[test]
    fn prop_merge_conserves_mass_and_momentum(
        m1 in 0.1f64..1000.0,
        m2 in 0.1f64..1000.0,
        v1 in spatial(),
        v2 in spatial(),
    ) {
        let a = body(0, m1, 2.0, Vector::spatial(0.0, 0.0, 0.0), v1);
        let b = body(1, m2, 1.0, Vector::spatial(1.0, 0.0, 0.0), v2);

        let merged = merge_bodies(&a, &b, BodyId(2)).unwrap();

        prop_assert!((merged.mass() - (m1 + m2)).abs() < 1e-9);
        let before = a.momentum().add(&b.momentum()).unwrap();
        let tolerance = (m1 * v1.magnitude() + m2 * v2.magnitude()) * 1e-12 + 1e-9;
        prop_assert!(close(&merged.momentum(), &before, tolerance));
    }

    #[test]
    fn prop_bounce_conserves_momentum(
        m1 in 0.1f64..1000.0,
        m2 in 0.1f64..1000.0,
        v1 in spatial(),
        v2 in spatial(),
        restitution in 0.0f64..=1.0,
    ) {
        let mut a = body(0, m1, 1.0, Vector::spatial(0.0, 0.0, 0.0), v1);
        let mut b = body(1, m2, 1.0, Vector::spatial(1.0, 0.5, 0.0), v2);
        let before = a.momentum().add(&b.momentum()).unwrap();
        let energy_before = a.kinetic_energy() + b.kinetic_energy();

        bounce_bodies(&mut a, &mut b, restitution).unwrap();

        let after = a.momentum().add(&b.momentum()).unwrap();
        let tolerance = (m1 + m2) * 1000.0 * 1e-10;
        prop_assert!(close(&after, &before, tolerance));

        // A bounce never adds energy
        let energy_after = a.kinetic_energy() + b.kinetic_energy();
        prop_assert!(energy_after <= energy_before * (1.0 + 1e-9) + 1e-9);
    }
}
