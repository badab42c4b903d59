//! Crate-level error type.
//!
//! The engine surfaces exactly one failure value to the caller (spec §7);
//! there is no retry discipline and nothing here is recoverable mid-run.

use std::fmt;

/// Errors surfaced by construction and integration.
#[derive(Clone, Debug, PartialEq)]
pub enum IntegrationError {
    /// A region, box, or integrand provider disagreed on axis count.
    DimensionMismatch { expected: usize, actual: usize },
    /// Box construction with a non-finite bound or `low > high` on `axis`.
    InvalidInterval { axis: usize, low: f64, high: f64 },
    /// Ellipsoid construction with a negative coefficient or negative `d`.
    InvalidEllipsoid { reason: String },
    /// NaN or infinity produced while accumulating `sum`/`error`.
    NonFiniteResult { depth: u32, reason: String },
    /// A leaf contributed `error < 0`; indicates a non-sound integrand range.
    NegativeError { leaf_error: f64 },
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {expected} axes, got {actual}"
            ),
            Self::InvalidInterval { axis, low, high } => write!(
                f,
                "invalid interval on axis {axis}: low {low} > high {high} (or non-finite)"
            ),
            Self::InvalidEllipsoid { reason } => write!(f, "invalid ellipsoid: {reason}"),
            Self::NonFiniteResult { depth, reason } => write!(
                f,
                "non-finite result accumulating at depth {depth}: {reason}"
            ),
            Self::NegativeError { leaf_error } => write!(
                f,
                "internal invariant violated: leaf contributed negative error ({leaf_error})"
            ),
        }
    }
}

impl std::error::Error for IntegrationError {}

pub type Result<T> = std::result::Result<T, IntegrationError>;
