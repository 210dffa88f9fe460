//! Error type shared by every fallible operation in the crate.

use crate::body::BodyId;

#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("dimension mismatch (expected {expected}D, got {got}D)")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("invalid value for `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("unknown body id {0}")]
    UnknownBodyId(BodyId),

    #[error("merging bodies {first} and {second} overflows f64")]
    MergeOverflow { first: BodyId, second: BodyId },

    #[error("invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("{value} is not finite")))
    }
}

/// Rejects zero, negative and non-finite values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("{value} must be > 0")))
    }
}

/// Rejects negative and non-finite values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("{value} must be >= 0")))
    }
}
