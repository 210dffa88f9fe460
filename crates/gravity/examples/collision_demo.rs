//! Collision modes side by side
//!
//! Drops two rocky bodies onto each other, once with merging and once with
//! bouncing, and prints what the world looks like after each phase.
//!
//! Run with: cargo run --package gravity --example collision_demo

use gravity::collisions::CollisionMode;
use gravity::config::DEFAULT_DELTA_TIME;
use gravity::{BodySpec, Dimension, World, create_world};

fn build(mode: CollisionMode) -> gravity::Result<World> {
    let mut world = create_world(Dimension::Two, 6000.0, 1.0, mode, 0.8)?;
    world.add_body(
        BodySpec::new(4.0e5, 5.0, vec![-40.0, 0.0], vec![30.0, 0.0]).with_name("Left"),
    )?;
    world.add_body(
        BodySpec::new(2.0e5, 4.0, vec![40.0, 0.0], vec![-30.0, 0.0]).with_name("Right"),
    )?;
    Ok(world)
}

fn print_world(world: &World) {
    for body in world.bodies() {
        println!(
            "  {} {:<6} m = {:>9.1}  r = {:>4.1}  x = {}  v = {}",
            body.id,
            body.name,
            body.mass(),
            body.radius(),
            body.position,
            body.velocity
        );
    }
}

fn run(mode: CollisionMode) -> gravity::Result<()> {
    println!("\nMode: {mode:?}");
    println!("{}", "-".repeat(60));

    let mut world = build(mode)?;
    let initial_momentum = world.total_momentum()?;
    print_world(&world);

    let mut steps = 0;
    while steps < 600 {
        let report = world.step(DEFAULT_DELTA_TIME)?;
        steps += 1;

        for merge in &report.merges {
            println!(
                "step {steps}: {} + {} -> {} (separation {:.2})",
                merge.event.body_a, merge.event.body_b, merge.merged, merge.event.separation
            );
        }
        if !report.bounces.is_empty() {
            println!("step {steps}: {} contact(s) bounced", report.bounces.len());
        }
        if !report.merges.is_empty() || !report.bounces.is_empty() {
            break;
        }
    }

    println!("\nAfter {steps} steps (t = {:.3}):", world.time());
    print_world(&world);

    let final_momentum = world.total_momentum()?;
    println!("  momentum before: {initial_momentum}");
    println!("  momentum after:  {final_momentum}");
    Ok(())
}

fn main() -> gravity::Result<()> {
    println!("Collision demo");
    println!("{}", "=".repeat(60));

    run(CollisionMode::Merge)?;
    run(CollisionMode::Bounce)?;
    Ok(())
}
