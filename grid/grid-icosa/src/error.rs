//! Error types for grid construction, hashing and cell assembly.

use grid_types::TypesError;
use thiserror::Error;

use crate::config::{Orientation, Projection};

/// Why a hash string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HashFormatError {
    /// Hashes have exactly 3 or 5 `|`-separated fields.
    #[error("expected 3 or 5 fields, found {0}")]
    FieldCount(usize),

    /// First field of a 5-field hash is not an orientation key.
    #[error("unknown orientation key '{0}' (expected one of: e, d)")]
    UnknownOrientationKey(String),

    /// Second field of a 5-field hash is not a projection key.
    #[error("unknown projection key '{0}' (expected one of: g, q)")]
    UnknownProjectionKey(String),

    /// A numeric field failed to parse.
    #[error("{field} '{value}' is not a non-negative integer")]
    InvalidNumber {
        /// Field name (`resolution`, `row` or `col`).
        field: &'static str,
        /// Raw field text.
        value: String,
    },

    /// Resolution outside `1..=Resolution::MAX`.
    #[error("resolution {0} is out of range (expected 1..={max})", max = grid_types::Resolution::MAX.get())]
    ResolutionOutOfRange(u32),

    /// Row past the south pole.
    #[error("row {row} is out of range (expected 0..={max})")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Last valid row.
        max: usize,
    },

    /// Column past the end of its row.
    #[error("col {col} is out of range for row {row} (expected 0..={max})")]
    ColOutOfRange {
        /// Requested column.
        col: usize,
        /// Row the column was checked against.
        row: usize,
        /// Last valid column of that row.
        max: usize,
    },
}

/// Errors that can occur in grid operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Orientation recognised but not implemented.
    #[error("unsupported orientation: {value} (supported: {supported})")]
    UnsupportedOrientation {
        /// Requested orientation.
        value: Orientation,
        /// Supported orientations.
        supported: &'static str,
    },

    /// Projection recognised but rejected without an explicit override.
    #[error("unsupported projection: {value} (supported: {supported})")]
    UnsupportedProjection {
        /// Requested projection.
        value: Projection,
        /// Supported projections.
        supported: &'static str,
    },

    /// Orientation or projection name that is not recognised at all.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownConfigValue {
        /// `orientation` or `projection`.
        kind: &'static str,
        /// Raw value.
        value: String,
        /// Recognised values.
        expected: &'static str,
    },

    /// Numeric configuration value outside its domain.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that failed.
        reason: &'static str,
    },

    /// The active projection cannot perform this operation yet.
    #[error("{projection} projection is not ready for {operation}")]
    ProjectionNotReady {
        /// Active projection.
        projection: Projection,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// Malformed or out-of-range hash string.
    #[error("invalid hash '{hash}': {reason}")]
    InvalidHash {
        /// The rejected hash.
        hash: String,
        /// What was wrong with it.
        #[source]
        reason: HashFormatError,
    },

    /// No triangle contains the point, caused by round-off at an edge or vertex.
    #[error("no triangle contains point ({x}, {y}, {z})")]
    NoContainingTriangle {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Z coordinate.
        z: f64,
    },

    /// The lazy window around a point held no phex center.
    #[error("lazy window on triangle {triangle} contains no phex center")]
    EmptyLazyWindow {
        /// Triangle the window was generated on.
        triangle: usize,
    },

    /// Row/col address that does not exist at the given resolution.
    #[error("address {row}|{col} does not exist at resolution {resolution}")]
    AddressOutOfGrid {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
        /// Resolution of the grid.
        resolution: u32,
    },

    /// Point and grid were generated at different resolutions.
    #[error("resolution mismatch: grid is {expected}, point is {found}")]
    ResolutionMismatch {
        /// Resolution of the grid.
        expected: u32,
        /// Resolution of the point.
        found: u32,
    },

    /// Primitive input outside its valid range (coordinates, resolution).
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl GridError {
    /// Create an invalid-hash error.
    #[must_use]
    pub fn invalid_hash(hash: impl Into<String>, reason: HashFormatError) -> Self {
        Self::InvalidHash {
            hash: hash.into(),
            reason,
        }
    }

    /// Create a no-containing-triangle error for a position.
    #[must_use]
    pub fn no_containing_triangle(position: &nalgebra::Point3<f64>) -> Self {
        Self::NoContainingTriangle {
            x: position.x,
            y: position.y,
            z: position.z,
        }
    }

    /// Unsupported or unknown orientation/projection, or bad numeric setting.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOrientation { .. }
                | Self::UnsupportedProjection { .. }
                | Self::UnknownConfigValue { .. }
                | Self::InvalidConfig { .. }
                | Self::ProjectionNotReady { .. }
        )
    }

    /// Malformed hash string.
    #[must_use]
    pub const fn is_hash_format(&self) -> bool {
        matches!(self, Self::InvalidHash { .. })
    }

    /// Floating-point failure locating a point on the mesh.
    #[must_use]
    pub const fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::NoContainingTriangle { .. } | Self::EmptyLazyWindow { .. }
        )
    }

    /// Input value outside its valid range.
    #[must_use]
    pub const fn is_input_range(&self) -> bool {
        matches!(
            self,
            Self::Types(_) | Self::AddressOutOfGrid { .. } | Self::ResolutionMismatch { .. }
        )
    }

    /// The hash rejection reason, if this is a hash error.
    #[must_use]
    pub const fn hash_reason(&self) -> Option<&HashFormatError> {
        match self {
            Self::InvalidHash { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Result type for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_messages_name_value_and_supported_set() {
        let err = GridError::UnsupportedOrientation {
            value: Orientation::Dymaxion,
            supported: "ECEF",
        };
        let display = err.to_string();
        assert!(display.contains("dymaxion"));
        assert!(display.contains("ECEF"));
        assert!(err.is_configuration());
        assert!(!err.is_hash_format());
    }

    #[test]
    fn test_hash_error_includes_range() {
        let err = GridError::invalid_hash(
            "1|999|0",
            HashFormatError::RowOutOfRange { row: 999, max: 9 },
        );
        let display = err.to_string();
        assert!(display.contains("1|999|0"));
        assert!(display.contains("999"));
        assert!(display.contains("0..=9"));
        assert!(err.is_hash_format());
        assert_eq!(
            err.hash_reason(),
            Some(&HashFormatError::RowOutOfRange { row: 999, max: 9 })
        );
    }

    #[test]
    fn test_types_error_is_input_range() {
        let err: GridError = TypesError::LatitudeOutOfRange(95.0).into();
        assert!(err.is_input_range());
        assert!(err.to_string().contains("95"));
    }

    #[test]
    fn test_geometry_error() {
        let err = GridError::no_containing_triangle(&nalgebra::Point3::new(1.0, 2.0, 3.0));
        assert!(err.is_geometry());
        assert_eq!(err.to_string(), "no triangle contains point (1, 2, 3)");
    }
}
