use crate::body_state::{BodyClass, BodyState};
use crate::error::{Result, SimError};
use crate::vector::{Dimension, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Sphere moment of inertia coefficient (I = 0.4 m r²)
pub const MOMENT_OF_INERTIA_COEFF: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A massive sphere moving through the world
///
/// Position and velocity always share one dimension. The physical state is
/// replaced wholesale on merge and never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Vector,
    pub velocity: Vector,
    /// Angular velocity in rad/s
    pub spin: f64,
    /// Rotation in [0, 2π)
    pub rotation_angle: f64,
    pub name: String,
    pub selected: bool,
    /// Anchored in place: never moves, still spins and attracts
    pub fixed: bool,
    state: BodyState,
    /// Acceleration from the most recent kick, used by the RK4 drift
    pub(crate) last_acceleration: Vector,
}

/// Wraps an angle into [0, 2π)
///
/// # Examples
///
/// ```
/// use gravity::body::wrap_angle;
/// use std::f64::consts::{PI, TAU};
///
/// assert_eq!(wrap_angle(TAU), 0.0);
/// assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

impl Body {
    /// Creates a body at rest rotation
    ///
    /// Fails with `DimensionMismatch` if position and velocity differ in
    /// dimension, and with `InvalidParameter` for non-finite kinematics.
    pub fn new(
        id: BodyId,
        state: BodyState,
        position: Vector,
        velocity: Vector,
        spin: f64,
        name: impl Into<String>,
    ) -> Result<Self> {
        position.ensure_same_dimension(&velocity)?;
        if !position.is_finite() {
            return Err(SimError::invalid("position", "components must be finite"));
        }
        if !velocity.is_finite() {
            return Err(SimError::invalid("velocity", "components must be finite"));
        }
        if !spin.is_finite() {
            return Err(SimError::invalid("spin", "must be finite"));
        }

        Ok(Body {
            id,
            last_acceleration: Vector::zeros(position.dimension()),
            position,
            velocity,
            spin,
            rotation_angle: 0.0,
            name: name.into(),
            selected: false,
            fixed: false,
            state,
        })
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn dimension(&self) -> Dimension {
        self.position.dimension()
    }

    pub fn mass(&self) -> f64 {
        self.state.mass()
    }

    pub fn radius(&self) -> f64 {
        self.state.radius()
    }

    pub fn temperature(&self) -> f64 {
        self.state.temperature()
    }

    pub fn class(&self) -> BodyClass {
        self.state.class()
    }

    /// Anchors the body in place (zeroing its velocity) or releases it
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
        if fixed {
            self.velocity = Vector::zeros(self.dimension());
        }
    }

    /// Moves the body by `velocity * dt * time_factor` and advances its rotation
    ///
    /// A fixed body only rotates.
    pub fn update_position(&mut self, dt: f64, time_factor: f64) -> Result<()> {
        if !self.fixed {
            self.position
                .accumulate(&self.velocity.scale(dt * time_factor))?;
        }
        self.advance_rotation(dt, time_factor);
        Ok(())
    }

    pub(crate) fn advance_rotation(&mut self, dt: f64, time_factor: f64) {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.spin * time_factor * dt);
    }

    /// Semi-implicit Euler kick: `velocity += acceleration * dt`; no-op when fixed
    pub fn update_velocity(&mut self, acceleration: &Vector, dt: f64) -> Result<()> {
        if self.fixed {
            return Ok(());
        }
        self.velocity.accumulate(&acceleration.scale(dt))
    }

    pub fn distance_to(&self, other: &Body) -> Result<f64> {
        Ok(self.position.subtract(&other.position)?.magnitude())
    }

    /// Newtonian attraction exerted on `self` by `other`
    ///
    /// Points from `self` toward `other` with magnitude `G m1 m2 / r²`.
    /// Coincident bodies yield the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravity::body::{Body, BodyId};
    /// use gravity::body_state::classify;
    /// use gravity::vector::Vector;
    ///
    /// let state = classify(10.0, 1.0, 0.0).unwrap();
    /// let a = Body::new(BodyId(0), state.clone(), Vector::planar(0.0, 0.0), Vector::planar(0.0, 0.0), 0.0, "a").unwrap();
    /// let b = Body::new(BodyId(1), state, Vector::planar(2.0, 0.0), Vector::planar(0.0, 0.0), 0.0, "b").unwrap();
    ///
    /// let force = a.gravitational_force_from(&b, 1.0).unwrap();
    /// assert_eq!(force, Vector::planar(25.0, 0.0));
    /// ```
    pub fn gravitational_force_from(&self, other: &Body, gravitational_constant: f64) -> Result<Vector> {
        let offset = other.position.subtract(&self.position)?;
        let distance = offset.magnitude();
        if distance == 0.0 {
            return Ok(Vector::zeros(self.dimension()));
        }

        let magnitude = gravitational_constant * self.mass() * other.mass() / (distance * distance);
        Ok(offset.normalize()?.scale(magnitude))
    }

    /// True when the spheres overlap; touching exactly is not a collision
    pub fn collides_with(&self, other: &Body) -> Result<bool> {
        Ok(self.distance_to(other)? < self.radius() + other.radius())
    }

    pub fn momentum(&self) -> Vector {
        self.velocity.scale(self.mass())
    }

    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.magnitude();
        0.5 * self.mass() * speed * speed
    }

    /// Spin angular momentum of a uniform sphere, `0.4 r² m ω`
    pub fn spin_angular_momentum(&self) -> f64 {
        MOMENT_OF_INERTIA_COEFF * self.radius().powi(2) * self.mass() * self.spin
    }

    /// Time for one full turn, if the body spins at all
    pub fn rotation_period(&self) -> Option<f64> {
        if self.spin == 0.0 {
            None
        } else {
            Some(TAU / self.spin)
        }
    }

    pub fn toggle_selected(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }
}
