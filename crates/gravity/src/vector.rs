//! Fixed-dimension vectors for positions, velocities and forces
//!
//! A [`Vector`] is either planar (2D) or spatial (3D). The dimension is fixed
//! when the vector is built and every binary operation checks it, so mixing
//! a 2D and a 3D vector is an error rather than a silent truncation.

use crate::error::{Result, SimError};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Number of spatial dimensions a world (and every vector in it) uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimension {
    Two,
    #[default]
    Three,
}

impl Dimension {
    /// Number of components in vectors of this dimension
    pub fn count(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(SimError::invalid(
                "dimension",
                format!("{other} is not 2 or 3"),
            )),
        }
    }
}

impl From<Dimension> for u8 {
    fn from(dimension: Dimension) -> Self {
        dimension.count() as u8
    }
}

/// A planar or spatial vector of `f64` components
///
/// All operations return a new vector, except [`Vector::accumulate`] which
/// adds in place.
///
/// # Examples
///
/// ```
/// use gravity::vector::Vector;
///
/// let a = Vector::spatial(1.0, 2.0, 2.0);
/// assert_eq!(a.magnitude(), 3.0);
///
/// let b = Vector::planar(1.0, 0.0);
/// assert!(a.add(&b).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vector {
    Planar(Vector2<f64>),
    Spatial(Vector3<f64>),
}

impl Vector {
    pub fn planar(x: f64, y: f64) -> Self {
        Vector::Planar(Vector2::new(x, y))
    }

    pub fn spatial(x: f64, y: f64, z: f64) -> Self {
        Vector::Spatial(Vector3::new(x, y, z))
    }

    /// Zero vector of the given dimension
    pub fn zeros(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Two => Vector::Planar(Vector2::zeros()),
            Dimension::Three => Vector::Spatial(Vector3::zeros()),
        }
    }

    /// Builds a vector from a component slice of length 2 or 3
    pub fn from_components(components: &[f64]) -> Result<Self> {
        match *components {
            [x, y] => Ok(Vector::planar(x, y)),
            [x, y, z] => Ok(Vector::spatial(x, y, z)),
            _ => Err(SimError::invalid(
                "components",
                format!("expected 2 or 3 components, got {}", components.len()),
            )),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Vector::Planar(_) => Dimension::Two,
            Vector::Spatial(_) => Dimension::Three,
        }
    }

    pub fn components(&self) -> &[f64] {
        match self {
            Vector::Planar(v) => v.as_slice(),
            Vector::Spatial(v) => v.as_slice(),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.components().to_vec()
    }

    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    fn mismatch(&self, other: &Vector) -> SimError {
        SimError::DimensionMismatch {
            expected: self.dimension().count(),
            got: other.dimension().count(),
        }
    }

    /// Fails with `DimensionMismatch` unless `other` has the same dimension
    pub fn ensure_same_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(self.mismatch(other))
        }
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        match (self, other) {
            (Vector::Planar(a), Vector::Planar(b)) => Ok(Vector::Planar(a + b)),
            (Vector::Spatial(a), Vector::Spatial(b)) => Ok(Vector::Spatial(a + b)),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        match (self, other) {
            (Vector::Planar(a), Vector::Planar(b)) => Ok(Vector::Planar(a - b)),
            (Vector::Spatial(a), Vector::Spatial(b)) => Ok(Vector::Spatial(a - b)),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn scale(&self, scalar: f64) -> Vector {
        match self {
            Vector::Planar(v) => Vector::Planar(v * scalar),
            Vector::Spatial(v) => Vector::Spatial(v * scalar),
        }
    }

    /// `scale(1 / scalar)`; a zero divisor yields infinities or NaN
    pub fn divide(&self, scalar: f64) -> Vector {
        self.scale(1.0 / scalar)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        match (self, other) {
            (Vector::Planar(a), Vector::Planar(b)) => Ok(a.dot(b)),
            (Vector::Spatial(a), Vector::Spatial(b)) => Ok(a.dot(b)),
            _ => Err(self.mismatch(other)),
        }
    }

    /// Cross product, defined for spatial vectors only
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        match (self, other) {
            (Vector::Spatial(a), Vector::Spatial(b)) => Ok(Vector::Spatial(a.cross(b))),
            (Vector::Spatial(_), _) => Err(self.mismatch(other)),
            _ => Err(SimError::DimensionMismatch {
                expected: 3,
                got: self.dimension().count(),
            }),
        }
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f64 {
        match self {
            Vector::Planar(v) => v.magnitude(),
            Vector::Spatial(v) => v.magnitude(),
        }
    }

    /// Unit vector in the same direction
    ///
    /// Fails with `DegenerateVector` when the magnitude is exactly zero.
    pub fn normalize(&self) -> Result<Vector> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(SimError::DegenerateVector);
        }
        Ok(self.scale(1.0 / magnitude))
    }

    /// In-place `self += other`
    pub fn accumulate(&mut self, other: &Vector) -> Result<()> {
        *self = self.add(other)?;
        Ok(())
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.components().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
