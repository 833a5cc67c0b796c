//! Error types for grid primitives.

use thiserror::Error;

use crate::resolution::Resolution;

/// Errors raised when a primitive receives a value outside its domain.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TypesError {
    /// Latitude outside `[-90, 90]` degrees.
    #[error("latitude {0} is out of range (expected -90..=90 degrees)")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]` degrees.
    #[error("longitude {0} is out of range (expected -180..=180 degrees)")]
    LongitudeOutOfRange(f64),

    /// Resolution outside `1..=Resolution::MAX`.
    #[error("invalid resolution: {0} (expected 1..={max})", max = Resolution::MAX.get())]
    InvalidResolution(u32),
}

impl TypesError {
    /// Check if this error comes from a geographic coordinate.
    #[must_use]
    pub const fn is_coordinate(&self) -> bool {
        matches!(
            self,
            Self::LatitudeOutOfRange(_) | Self::LongitudeOutOfRange(_)
        )
    }
}

/// Result type for grid primitives.
pub type TypesResult<T> = std::result::Result<T, TypesError>;
