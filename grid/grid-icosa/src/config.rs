//! Grid configuration.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Default sphere radius.
pub const DEFAULT_RADIUS: f64 = 250.0;

/// Default lazy window width (rows and columns around the estimate).
pub const DEFAULT_LAZY_RANGE: usize = 4;

/// Golden ratio `(1 + √5) / 2`, the default base-solid vertex ratio.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// How the icosahedron is oriented on the sphere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// North vertex on the `+Z` axis.
    #[default]
    Ecef,
    /// Dymaxion layout. Recognised but not implemented.
    Dymaxion,
}

impl Orientation {
    /// Single-character hash key.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Ecef => 'e',
            Self::Dymaxion => 'd',
        }
    }

    /// Look up an orientation by hash key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "e" => Some(Self::Ecef),
            "d" => Some(Self::Dymaxion),
            _ => None,
        }
    }

    /// Whether meshes can be built with this orientation.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Ecef)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ecef => "ECEF",
            Self::Dymaxion => "dymaxion",
        })
    }
}

impl FromStr for Orientation {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        if s.eq_ignore_ascii_case("ecef") {
            Ok(Self::Ecef)
        } else if s.eq_ignore_ascii_case("dymaxion") {
            Ok(Self::Dymaxion)
        } else {
            Err(GridError::UnknownConfigValue {
                kind: "orientation",
                value: s.to_string(),
                expected: "ECEF, dymaxion",
            })
        }
    }
}

/// How points are placed between triangle vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Projection {
    /// Linear interpolation on a plane near the face, then re-normalized.
    #[default]
    Gnomonic,
    /// Equal-angle rotation along great circles.
    ///
    /// Point placement works but locating a point inside a face does not,
    /// so meshes refuse it unless [`GridConfig::allow_quaternion`] is set.
    Quaternion,
}

impl Projection {
    /// Single-character hash key.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Gnomonic => 'g',
            Self::Quaternion => 'q',
        }
    }

    /// Look up a projection by hash key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "g" => Some(Self::Gnomonic),
            "q" => Some(Self::Quaternion),
            _ => None,
        }
    }

    /// Whether generated points need rescaling onto the sphere.
    #[must_use]
    pub const fn needs_spherify(self) -> bool {
        matches!(self, Self::Gnomonic)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gnomonic => "gnomonic",
            Self::Quaternion => "quaternion",
        })
    }
}

impl FromStr for Projection {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        if s.eq_ignore_ascii_case("gnomonic") {
            Ok(Self::Gnomonic)
        } else if s.eq_ignore_ascii_case("quaternion") {
            Ok(Self::Quaternion)
        } else {
            Err(GridError::UnknownConfigValue {
                kind: "projection",
                value: s.to_string(),
                expected: "gnomonic, quaternion",
            })
        }
    }
}

/// Configuration for building an [`IcosahedronMesh`](crate::IcosahedronMesh).
///
/// # Example
///
/// ```
/// use grid_icosa::{GridConfig, Projection};
///
/// let config = GridConfig::new()
///     .with_radius(1.0)
///     .with_lazy_range(6)
///     .with_parallel(false);
///
/// assert_eq!(config.projection, Projection::Gnomonic);
/// assert_eq!(config.lazy_half_width(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Orientation of the base solid.
    pub orientation: Orientation,

    /// Point placement projection.
    pub projection: Projection,

    /// Accept [`Projection::Quaternion`] despite its incomplete point location.
    pub allow_quaternion: bool,

    /// Sphere radius.
    pub radius: f64,

    /// Ratio used to place the base-solid vertices.
    pub golden_ratio: f64,

    /// Full width of the lazy generation window.
    pub lazy_range: usize,

    /// Generate faces in parallel in [`IcosahedronMesh::all_points`](crate::IcosahedronMesh::all_points).
    pub parallel: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            projection: Projection::default(),
            allow_quaternion: false,
            radius: DEFAULT_RADIUS,
            golden_ratio: GOLDEN_RATIO,
            lazy_range: DEFAULT_LAZY_RANGE,
            parallel: true,
        }
    }
}

impl GridConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for quaternion placement with the safety check bypassed.
    #[must_use]
    pub fn quaternion() -> Self {
        Self {
            projection: Projection::Quaternion,
            allow_quaternion: true,
            ..Self::default()
        }
    }

    /// Set orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set projection.
    #[must_use]
    pub const fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Set whether quaternion projection is accepted.
    #[must_use]
    pub const fn with_allow_quaternion(mut self, allow: bool) -> Self {
        self.allow_quaternion = allow;
        self
    }

    /// Set sphere radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set base-solid ratio.
    #[must_use]
    pub const fn with_golden_ratio(mut self, ratio: f64) -> Self {
        self.golden_ratio = ratio;
        self
    }

    /// Set lazy window width.
    #[must_use]
    pub const fn with_lazy_range(mut self, range: usize) -> Self {
        self.lazy_range = range;
        self
    }

    /// Set whether full-grid generation runs in parallel.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rows/columns generated on each side of the lazy estimate.
    #[must_use]
    pub const fn lazy_half_width(&self) -> usize {
        self.lazy_range / 2
    }

    /// Check that this configuration can build a mesh.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unimplemented orientation, for
    /// quaternion projection without `allow_quaternion`, or for a radius or
    /// ratio that is not finite and positive.
    pub fn validate(&self) -> GridResult<()> {
        if !self.orientation.is_supported() {
            return Err(GridError::UnsupportedOrientation {
                value: self.orientation,
                supported: "ECEF",
            });
        }
        if self.projection == Projection::Quaternion && !self.allow_quaternion {
            return Err(GridError::UnsupportedProjection {
                value: self.projection,
                supported: "gnomonic (quaternion requires allow_quaternion)",
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GridError::InvalidConfig {
                field: "radius",
                value: self.radius,
                reason: "must be finite and positive",
            });
        }
        if !(self.golden_ratio.is_finite() && self.golden_ratio > 0.0) {
            return Err(GridError::InvalidConfig {
                field: "golden_ratio",
                value: self.golden_ratio,
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}
