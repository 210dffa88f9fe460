use approx::assert_relative_eq;
use std::f64::consts::{PI, TAU};

use crate::body::{Body, BodyId, wrap_angle};
use crate::body_state::classify;
use crate::error::SimError;
use crate::vector::Vector;

fn body_at(id: u32, mass: f64, radius: f64, position: Vector, velocity: Vector) -> Body {
    let state = classify(mass, radius, 0.0).unwrap();
    Body::new(BodyId(id), state, position, velocity, 0.0, format!("body {id}")).unwrap()
}

#[test]
fn test_new_rejects_mixed_dimensions() {
    let state = classify(1.0, 1.0, 0.0).unwrap();
    let result = Body::new(
        BodyId(0),
        state,
        Vector::spatial(0.0, 0.0, 0.0),
        Vector::planar(0.0, 0.0),
        0.0,
        "mixed",
    );
    assert!(matches!(result, Err(SimError::DimensionMismatch { .. })));
}

#[test]
fn test_new_rejects_non_finite_kinematics() {
    let state = classify(1.0, 1.0, 0.0).unwrap();
    let result = Body::new(
        BodyId(0),
        state,
        Vector::planar(f64::NAN, 0.0),
        Vector::planar(0.0, 0.0),
        0.0,
        "nan",
    );
    assert!(matches!(result, Err(SimError::InvalidParameter { .. })));
}

#[test]
fn test_update_position() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(1.0, 2.0), Vector::planar(3.0, -6.0));

    body.update_position(0.5, 2.0).unwrap();

    // Displacement = v * dt * time_factor = v * 1.0
    assert_eq!(body.position, Vector::planar(4.0, -4.0));
}

#[test]
fn test_update_velocity() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(1.0, 1.0));

    body.update_velocity(&Vector::planar(10.0, -20.0), 0.1).unwrap();

    assert_relative_eq!(body.velocity.components()[0], 2.0, epsilon = 1e-12);
    assert_relative_eq!(body.velocity.components()[1], -1.0, epsilon = 1e-12);
}

#[test]
fn test_rotation_wraps_into_range() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    body.spin = PI;

    // Two half turns land exactly on 2π, which wraps to 0
    body.update_position(1.0, 1.0).unwrap();
    assert_relative_eq!(body.rotation_angle, PI, epsilon = 1e-12);
    body.update_position(1.0, 1.0).unwrap();
    assert_eq!(body.rotation_angle, 0.0);
}

#[test]
fn test_negative_spin_stays_non_negative() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    body.spin = -1.0;

    body.update_position(0.5, 1.0).unwrap();

    assert!(body.rotation_angle >= 0.0 && body.rotation_angle < TAU);
    assert_relative_eq!(body.rotation_angle, TAU - 0.5, epsilon = 1e-12);
}

#[test]
fn test_wrap_angle_boundaries() {
    assert_eq!(wrap_angle(0.0), 0.0);
    assert_eq!(wrap_angle(TAU), 0.0);
    assert_eq!(wrap_angle(-TAU), 0.0);
    assert!(wrap_angle(-1e-18) < TAU);
    assert_relative_eq!(wrap_angle(3.0 * PI), PI, epsilon = 1e-12);
}

#[test]
fn test_distance_to() {
    let a = body_at(0, 1.0, 1.0, Vector::spatial(0.0, 0.0, 0.0), Vector::spatial(0.0, 0.0, 0.0));
    let b = body_at(1, 1.0, 1.0, Vector::spatial(3.0, 4.0, 12.0), Vector::spatial(0.0, 0.0, 0.0));

    assert_eq!(a.distance_to(&b).unwrap(), 13.0);
}

#[test]
fn test_gravitational_force_magnitude_and_direction() {
    let a = body_at(0, 2.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    let b = body_at(1, 3.0, 1.0, Vector::planar(0.0, 10.0), Vector::planar(0.0, 0.0));

    // F = G m1 m2 / r² = 5 * 2 * 3 / 100
    let force = a.gravitational_force_from(&b, 5.0).unwrap();
    assert_relative_eq!(force.components()[0], 0.0, epsilon = 1e-15);
    assert_relative_eq!(force.components()[1], 0.3, epsilon = 1e-12);
}

#[test]
fn test_gravitational_force_is_antisymmetric() {
    let a = body_at(0, 7.0, 1.0, Vector::spatial(1.0, -2.0, 3.0), Vector::spatial(0.0, 0.0, 0.0));
    let b = body_at(1, 3.0, 1.0, Vector::spatial(-4.0, 5.0, 0.5), Vector::spatial(0.0, 0.0, 0.0));

    let f_ab = a.gravitational_force_from(&b, 6000.0).unwrap();
    let f_ba = b.gravitational_force_from(&a, 6000.0).unwrap();

    let sum = f_ab.add(&f_ba).unwrap();
    assert!(sum.magnitude() < 1e-9 * f_ab.magnitude());
}

#[test]
fn test_gravitational_force_at_zero_distance_is_zero() {
    let a = body_at(0, 1.0, 1.0, Vector::planar(5.0, 5.0), Vector::planar(0.0, 0.0));
    let b = body_at(1, 1.0, 1.0, Vector::planar(5.0, 5.0), Vector::planar(0.0, 0.0));

    assert_eq!(
        a.gravitational_force_from(&b, 6000.0).unwrap(),
        Vector::planar(0.0, 0.0)
    );
}

#[test]
fn test_collides_with_is_strict() {
    let a = body_at(0, 1.0, 2.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    let touching = body_at(1, 1.0, 3.0, Vector::planar(5.0, 0.0), Vector::planar(0.0, 0.0));
    let overlapping = body_at(2, 1.0, 3.0, Vector::planar(4.9, 0.0), Vector::planar(0.0, 0.0));

    assert!(!a.collides_with(&touching).unwrap());
    assert!(a.collides_with(&overlapping).unwrap());
}

#[test]
fn test_momentum_and_kinetic_energy() {
    let body = body_at(0, 2.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(3.0, 4.0));

    assert_eq!(body.momentum(), Vector::planar(6.0, 8.0));
    // KE = 0.5 * 2 * 25
    assert_eq!(body.kinetic_energy(), 25.0);
}

#[test]
fn test_spin_properties() {
    let mut body = body_at(0, 10.0, 2.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    assert_eq!(body.rotation_period(), None);

    body.spin = 0.5;
    assert_relative_eq!(body.rotation_period().unwrap(), 4.0 * PI, epsilon = 1e-12);
    // 0.4 * r² * m * ω = 0.4 * 4 * 10 * 0.5
    assert_relative_eq!(body.spin_angular_momentum(), 8.0, epsilon = 1e-12);
}

#[test]
fn test_toggle_selected() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    assert!(body.toggle_selected());
    assert!(!body.toggle_selected());
}

#[test]
fn test_fixed_body_only_rotates() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(2.0, 3.0), Vector::planar(1.0, 1.0));
    body.spin = 0.5;
    body.set_fixed(true);
    assert_eq!(body.velocity, Vector::planar(0.0, 0.0));

    body.update_velocity(&Vector::planar(10.0, 0.0), 1.0).unwrap();
    body.update_position(1.0, 2.0).unwrap();

    assert_eq!(body.velocity, Vector::planar(0.0, 0.0));
    assert_eq!(body.position, Vector::planar(2.0, 3.0));
    assert_relative_eq!(body.rotation_angle, 1.0, epsilon = 1e-12);
}

#[test]
fn test_released_body_moves_again() {
    let mut body = body_at(0, 1.0, 1.0, Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0));
    body.set_fixed(true);
    body.set_fixed(false);

    body.update_velocity(&Vector::planar(2.0, 0.0), 1.0).unwrap();
    body.update_position(1.0, 1.0).unwrap();

    assert_eq!(body.position, Vector::planar(2.0, 0.0));
}
