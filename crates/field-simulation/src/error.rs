//! Parameter validation errors

use thiserror::Error;

/// Rejected [`FieldParams`](crate::FieldParams) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// Density of zero or less would divide the area by nothing.
    #[error("density must be positive, got {0}")]
    NonPositiveDensity(f32),

    /// Connection threshold of zero or less.
    #[error("connection distance must be positive, got {0}")]
    NonPositiveDistance(f32),

    /// Speed that is negative or not finite.
    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),

    /// A min/max pair with min above max.
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        /// Which range.
        name: &'static str,
        /// Lower bound as given.
        min: f32,
        /// Upper bound as given.
        max: f32,
    },

    /// An opacity outside [0, 1].
    #[error("{name} must be within [0, 1], got {value}")]
    AlphaOutOfRange {
        /// Which opacity.
        name: &'static str,
        /// Value as given.
        value: f32,
    },
}
