//! Initial body sets for a world
//!
//! A scenario bundles a [`WorldConfig`] with the bodies to seed it with and
//! can be loaded from JSON:
//!
//! ```json
//! {
//!   "world": { "dimension": 2, "collision_mode": "bounce", "restitution": 0.8 },
//!   "bodies": [
//!     { "mass": 1000.0, "radius": 20.0, "position": [0.0, 0.0], "velocity": [0.0, 0.0],
//!       "temperature": 5778.0, "name": "Sun" },
//!     { "mass": 50.0, "radius": 10.0, "position": [60.0, 20.0], "velocity": [0.0, -8.0] }
//!   ]
//! }
//! ```

use crate::config::WorldConfig;
use crate::error::Result;
use crate::vector::Dimension;
use crate::world::{BodySpec, World};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Takes the first `dimension` components of a 3D triple
fn truncate(components: [f64; 3], dimension: Dimension) -> Vec<f64> {
    components[..dimension.count()].to_vec()
}

/// The default startup scene: a star at the origin and one planet orbiting it
///
/// # Examples
///
/// ```
/// use gravity::scenario::sun_and_earth;
/// use gravity::vector::Dimension;
/// use gravity::world::World;
///
/// let world = World::from_scenario(sun_and_earth(Dimension::Two)).unwrap();
/// assert_eq!(world.body_count(), 2);
/// ```
pub fn sun_and_earth(dimension: Dimension) -> ScenarioConfig {
    let sun = BodySpec::new(
        1000.0,
        20.0,
        truncate([0.0, 0.0, 0.0], dimension),
        truncate([0.0, 0.0, 0.0], dimension),
    )
    .with_spin(0.02)
    .with_temperature(5778.0)
    .with_name("Sun");

    let earth = BodySpec::new(
        50.0,
        10.0,
        truncate([60.0, 20.0, 0.0], dimension),
        truncate([0.0, -8.0, 0.0], dimension),
    )
    .with_spin(0.06)
    .with_temperature(288.0)
    .with_name("Earth");

    ScenarioConfig {
        world: WorldConfig::default().with_dimension(dimension),
        bodies: vec![sun, earth],
    }
}

impl World {
    /// Builds a world and seeds it with the scenario's bodies, in order
    ///
    /// Fails on the first invalid body.
    pub fn from_scenario(scenario: ScenarioConfig) -> Result<Self> {
        let mut world = World::new(scenario.world)?;
        for spec in scenario.bodies {
            world.add_body(spec)?;
        }
        info!("loaded scenario with {} bodies", world.body_count());
        Ok(world)
    }
}
