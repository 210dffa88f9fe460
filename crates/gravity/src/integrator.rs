//! Time integration for body kinematics
//!
//! The world splits a step into a velocity kick (after forces are known)
//! and a position drift (after collisions are applied). An [`Integrator`]
//! decides how each half updates a body.

use crate::body::Body;
use crate::error::Result;
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Kick/drift update rule for a single body
pub trait Integrator {
    /// Update velocity from `acceleration` over `dt` (already time-scaled)
    fn kick(&self, body: &mut Body, acceleration: &Vector, dt: f64) -> Result<()>;

    /// Update position and rotation over `dt * time_factor`
    fn drift(&self, body: &mut Body, dt: f64, time_factor: f64) -> Result<()>;
}

/// Semi-implicit (symplectic) Euler
///
/// Velocity is kicked first, then position drifts with the new velocity:
///
/// 1. v(t + dt) = v(t) + a(t) * dt
/// 2. x(t + dt) = x(t) + v(t + dt) * dt
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn kick(&self, body: &mut Body, acceleration: &Vector, dt: f64) -> Result<()> {
        body.last_acceleration = *acceleration;
        body.update_velocity(acceleration, dt)
    }

    fn drift(&self, body: &mut Body, dt: f64, time_factor: f64) -> Result<()> {
        body.update_position(dt, time_factor)
    }
}

/// Fourth-order Runge-Kutta with the acceleration held constant over the step
///
/// With a frozen acceleration the four velocity stages are identical, so the
/// kick matches Euler. The drift stages sample v, v + a h/2 (twice) and
/// v + a h, which weights out to `x += v h + a h² / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn kick(&self, body: &mut Body, acceleration: &Vector, dt: f64) -> Result<()> {
        body.last_acceleration = *acceleration;
        body.update_velocity(acceleration, dt)
    }

    fn drift(&self, body: &mut Body, dt: f64, time_factor: f64) -> Result<()> {
        if body.fixed {
            body.advance_rotation(dt, time_factor);
            return Ok(());
        }
        let h = dt * time_factor;
        let k1 = body.velocity.scale(h);
        let k_mid = body
            .velocity
            .add(&body.last_acceleration.scale(h * 0.5))?
            .scale(h);
        let k4 = body.velocity.add(&body.last_acceleration.scale(h))?.scale(h);

        let displacement = k1
            .add(&k_mid.scale(2.0))?
            .add(&k_mid.scale(2.0))?
            .add(&k4)?
            .divide(6.0);
        body.position.accumulate(&displacement)?;
        body.advance_rotation(dt, time_factor);
        Ok(())
    }
}

/// Integrator choice carried by the world configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    #[default]
    Euler,
    Rk4,
}

impl IntegratorKind {
    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::Euler => &SemiImplicitEuler,
            IntegratorKind::Rk4 => &Rk4,
        }
    }
}
