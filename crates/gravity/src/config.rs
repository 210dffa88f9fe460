//! World configuration and runtime parameter updates
//!
//! [`WorldConfig`] is serde-(de)serializable so a frame controller or wire
//! layer can ship it as JSON:
//!
//! ```json
//! {
//!   "dimension": 3,
//!   "gravitational_constant": 6000.0,
//!   "time_factor": 1.0,
//!   "collision_mode": "merge",
//!   "restitution": 1.0,
//!   "integrator": "euler",
//!   "paused": false
//! }
//! ```
//!
//! Missing fields take their defaults.

use crate::collisions::CollisionMode;
use crate::error::{Result, SimError, ensure_finite, ensure_non_negative};
use crate::integrator::IntegratorKind;
use crate::vector::Dimension;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 6000.0;
/// Fixed frame step (60 Hz) used by the reference frame controller
pub const DEFAULT_DELTA_TIME: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub dimension: Dimension,
    pub gravitational_constant: f64,
    /// Multiplies simulated time per step
    pub time_factor: f64,
    pub collision_mode: CollisionMode,
    /// Coefficient of restitution for bounces, in [0, 1]
    pub restitution: f64,
    pub integrator: IntegratorKind,
    /// While set, `World::step` leaves the world untouched
    pub paused: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Three,
            gravitational_constant: DEFAULT_GRAVITATIONAL_CONSTANT,
            time_factor: 1.0,
            collision_mode: CollisionMode::Merge,
            restitution: 1.0,
            integrator: IntegratorKind::Euler,
            paused: false,
        }
    }
}

fn check_gravitational_constant(value: f64) -> Result<f64> {
    ensure_non_negative("gravitational_constant", value)
}

fn check_time_factor(value: f64) -> Result<f64> {
    ensure_non_negative("time_factor", value)
}

fn check_restitution(value: f64) -> Result<f64> {
    ensure_finite("restitution", value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::invalid(
            "restitution",
            format!("{value} is outside [0, 1]"),
        ))
    }
}

impl WorldConfig {
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_collision_mode(mut self, mode: CollisionMode) -> Self {
        self.collision_mode = mode;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_gravitational_constant(self.gravitational_constant)?;
        check_time_factor(self.time_factor)?;
        check_restitution(self.restitution)?;
        Ok(())
    }

    /// Applies one parameter update
    ///
    /// Invalid values are rejected and leave the config untouched.
    pub fn apply(&mut self, parameter: Parameter) -> Result<()> {
        match parameter {
            Parameter::GravitationalConstant(g) => {
                self.gravitational_constant = check_gravitational_constant(g)?;
            }
            Parameter::TimeFactor(factor) => {
                self.time_factor = check_time_factor(factor)?;
            }
            Parameter::CollisionMode(mode) => self.collision_mode = mode,
            Parameter::Restitution(e) => self.restitution = check_restitution(e)?,
            Parameter::Integrator(kind) => self.integrator = kind,
            Parameter::Paused(paused) => self.paused = paused,
        }
        Ok(())
    }
}

/// A single runtime-tunable world parameter
///
/// Serialized as `{"name": "restitution", "value": 0.8}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum Parameter {
    GravitationalConstant(f64),
    TimeFactor(f64),
    CollisionMode(CollisionMode),
    Restitution(f64),
    Integrator(IntegratorKind),
    Paused(bool),
}
