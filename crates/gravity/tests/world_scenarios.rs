//! End-to-end runs through the public API

use approx::assert_relative_eq;
use gravity::body_state::BodyClass;
use gravity::collisions::CollisionMode;
use gravity::config::{DEFAULT_DELTA_TIME, Parameter};
use gravity::scenario::{ScenarioConfig, sun_and_earth};
use gravity::snapshot::WorldSnapshot;
use gravity::{BodySpec, Dimension, World, create_world};

#[test]
fn sun_and_earth_conserve_mass_and_momentum() {
    let mut world = World::from_scenario(sun_and_earth(Dimension::Three)).unwrap();
    let initial_momentum = world.total_momentum().unwrap();

    for _ in 0..60 {
        world.step(DEFAULT_DELTA_TIME).unwrap();
    }

    // Earth may have fallen into the Sun by now; either way nothing is lost
    assert!(world.body_count() >= 1);
    assert_relative_eq!(world.total_mass(), 1050.0);
    assert_relative_eq!(world.time(), 1.0, epsilon = 1e-9);

    let drift = world
        .total_momentum()
        .unwrap()
        .subtract(&initial_momentum)
        .unwrap()
        .magnitude();
    assert!(drift < 1e-6, "momentum drifted by {drift}");

    let snapshot = world.snapshot();
    assert_eq!(snapshot.bodies[0].class, BodyClass::Star);
    assert_eq!(snapshot.bodies[0].name, "Sun");
}

#[test]
fn infalling_bodies_eventually_merge() {
    let mut world = create_world(Dimension::Two, 100.0, 1.0, CollisionMode::Merge, 1.0).unwrap();
    world
        .add_body(BodySpec::new(1000.0, 5.0, vec![0.0, 0.0], vec![0.0, 0.0]))
        .unwrap();
    world
        .add_body(BodySpec::new(10.0, 2.0, vec![50.0, 0.0], vec![0.0, 0.0]))
        .unwrap();

    let mut merged = false;
    for _ in 0..600 {
        if !world.step(DEFAULT_DELTA_TIME).unwrap().merges.is_empty() {
            merged = true;
            break;
        }
    }

    assert!(merged);
    assert_eq!(world.body_count(), 1);
    assert_relative_eq!(world.total_mass(), 1010.0);
}

#[test]
fn bouncing_bodies_keep_count_and_momentum() {
    let mut world = create_world(Dimension::Two, 0.0, 1.0, CollisionMode::Bounce, 1.0).unwrap();
    world
        .add_body(BodySpec::new(2.0, 1.0, vec![-5.0, 0.0], vec![4.0, 0.0]))
        .unwrap();
    world
        .add_body(BodySpec::new(1.0, 1.0, vec![5.0, 0.3], vec![-4.0, 0.0]))
        .unwrap();
    let initial = world.total_momentum().unwrap();

    let mut bounced = false;
    for _ in 0..240 {
        bounced |= !world.step(DEFAULT_DELTA_TIME).unwrap().bounces.is_empty();
    }

    assert!(bounced);
    assert_eq!(world.body_count(), 2);
    let after = world.total_momentum().unwrap();
    assert!(after.subtract(&initial).unwrap().magnitude() < 1e-9);
}

#[test]
fn runtime_parameters_and_snapshot_json() {
    let json = r#"{
        "world": { "dimension": 2 },
        "bodies": [
            { "mass": 1.0, "radius": 1.0, "position": [0.0, 0.0], "velocity": [1.0, 0.0] }
        ]
    }"#;
    let mut world = World::from_scenario(ScenarioConfig::from_json(json).unwrap()).unwrap();

    world.set_parameter(Parameter::TimeFactor(2.0)).unwrap();
    world.step(0.5).unwrap();

    let snapshot: WorldSnapshot =
        serde_json::from_str(&world.snapshot().to_json().unwrap()).unwrap();
    assert_eq!(snapshot.time, 1.0);
    assert_eq!(snapshot.bodies[0].position, vec![1.0, 0.0]);
}
