//! Hash strings: encoding points to addresses and decoding them back.
//!
//! A hash is `"{resolution}|{row}|{col}"` for the default ECEF/gnomonic
//! mesh, or `"{orientation}|{projection}|{resolution}|{row}|{col}"` when the
//! mesh differs from the defaults.

use std::fmt;
use std::str::FromStr;

use grid_types::{GridPoint, Resolution, closest_center, from_coordinates};
use nalgebra::Point3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{Orientation, Projection};
use crate::error::{GridError, GridResult, HashFormatError};
use crate::icosahedron::IcosahedronMesh;

/// A parsed hash.
///
/// Parsing checks the field count, the keys and the address bounds.
/// Whether the orientation and projection are implemented is checked when
/// a mesh is built from the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HashKey {
    /// Mesh orientation.
    pub orientation: Orientation,
    /// Mesh projection.
    pub projection: Projection,
    /// Grid resolution.
    pub resolution: Resolution,
    /// Global row.
    pub row: usize,
    /// Column within the row.
    pub col: usize,
}

impl HashKey {
    /// Key for the default ECEF/gnomonic mesh.
    #[must_use]
    pub fn new(resolution: Resolution, row: usize, col: usize) -> Self {
        Self {
            orientation: Orientation::default(),
            projection: Projection::default(),
            resolution,
            row,
            col,
        }
    }

    /// Key addressing `point` on a mesh with the given settings.
    #[must_use]
    pub const fn for_point(point: &GridPoint, orientation: Orientation, projection: Projection) -> Self {
        Self {
            orientation,
            projection,
            resolution: point.resolution,
            row: point.row,
            col: point.col,
        }
    }

    /// Whether the 3-field form is used.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.orientation == Orientation::default() && self.projection == Projection::default()
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_short() {
            write!(f, "{}|{}|", self.orientation.key(), self.projection.key())?;
        }
        write!(f, "{}|{}|{}", self.resolution, self.row, self.col)
    }
}

/// Parse a canonical decimal field: ASCII digits only, no sign, no leading zero.
fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, HashFormatError> {
    let invalid = || HashFormatError::InvalidNumber {
        field,
        value: value.to_string(),
    };
    let canonical = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'));
    if !canonical {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn parse_fields(hash: &str) -> Result<HashKey, HashFormatError> {
    let fields: Vec<&str> = hash.split('|').collect();
    let (orientation, projection, numbers) = match fields.as_slice() {
        [res, row, col] => (Orientation::default(), Projection::default(), [*res, *row, *col]),
        [o, p, res, row, col] => (
            Orientation::from_key(o)
                .ok_or_else(|| HashFormatError::UnknownOrientationKey((*o).to_string()))?,
            Projection::from_key(p)
                .ok_or_else(|| HashFormatError::UnknownProjectionKey((*p).to_string()))?,
            [*res, *row, *col],
        ),
        _ => return Err(HashFormatError::FieldCount(fields.len())),
    };

    let value: u32 = parse_number("resolution", numbers[0])?;
    let resolution =
        Resolution::new(value).map_err(|_| HashFormatError::ResolutionOutOfRange(value))?;
    let row: usize = parse_number("row", numbers[1])?;
    let col: usize = parse_number("col", numbers[2])?;

    if row > resolution.max_row() {
        return Err(HashFormatError::RowOutOfRange {
            row,
            max: resolution.max_row(),
        });
    }
    // every valid row holds at least one point
    let width = resolution.row_width(row);
    if col >= width {
        return Err(HashFormatError::ColOutOfRange {
            col,
            row,
            max: width - 1,
        });
    }

    Ok(HashKey {
        orientation,
        projection,
        resolution,
        row,
        col,
    })
}

impl FromStr for HashKey {
    type Err = GridError;

    fn from_str(hash: &str) -> GridResult<Self> {
        parse_fields(hash).map_err(|reason| GridError::invalid_hash(hash, reason))
    }
}

impl IcosahedronMesh {
    /// Hash key of the mesh point nearest to `point`.
    fn key_for(&self, point: &GridPoint) -> HashKey {
        HashKey::for_point(point, self.config().orientation, self.config().projection)
    }

    /// The phex center nearest to `point`, found from a lazy window.
    ///
    /// # Errors
    ///
    /// Returns a geometry error when the point cannot be located on a face or
    /// its window holds no center, and [`GridError::ProjectionNotReady`] for
    /// quaternion projection.
    pub fn nearest_center(&self, point: &Point3<f64>, resolution: Resolution) -> GridResult<GridPoint> {
        let candidates = self.points_around_lazy(point, resolution)?;
        closest_center(point, &candidates).copied().ok_or_else(|| {
            let triangle = self.containing_triangle(point).map_or(usize::MAX, |t| t.id);
            GridError::EmptyLazyWindow { triangle }
        })
    }

    /// Hash of the phex center nearest to `point`.
    ///
    /// # Errors
    ///
    /// See [`nearest_center`](Self::nearest_center).
    ///
    /// # Example
    ///
    /// ```
    /// use grid_icosa::{GridConfig, IcosahedronMesh};
    /// use grid_types::{Point3, Resolution};
    ///
    /// let mesh = IcosahedronMesh::new(GridConfig::default())?;
    /// let hash = mesh.generate_hash(&Point3::new(0.0, 0.0, 250.0), Resolution::new(1)?)?;
    /// assert_eq!(hash, "1|0|0");
    /// # Ok::<(), grid_icosa::GridError>(())
    /// ```
    pub fn generate_hash(&self, point: &Point3<f64>, resolution: Resolution) -> GridResult<String> {
        let center = self.nearest_center(point, resolution)?;
        let hash = self.key_for(&center).to_string();
        debug!("Hashed point {:?} at resolution {} to {}", point, resolution, hash);
        Ok(hash)
    }

    /// Hash of the phex center nearest to a latitude/longitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns an input-range error for invalid coordinates, otherwise as
    /// [`generate_hash`](Self::generate_hash).
    pub fn hash_coordinates(&self, lat: f64, lon: f64, resolution: Resolution) -> GridResult<String> {
        let point = from_coordinates(lat, lon, self.config().radius)?;
        self.generate_hash(&point.position, resolution)
    }

    /// Decode a hash into the mesh it names and the point it addresses.
    ///
    /// A 5-field hash whose keys differ from this mesh rebuilds a mesh from
    /// this mesh's configuration with the hash's orientation and projection.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidHash`] for a malformed or out-of-range
    /// hash and a configuration error when the keys name an unsupported
    /// mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_icosa::{GridConfig, IcosahedronMesh};
    ///
    /// let mesh = IcosahedronMesh::new(GridConfig::default())?;
    /// let (_, north) = mesh.parse_hash("1|0|0")?;
    ///
    /// assert!((north.position().z - 250.0).abs() < 1e-9);
    /// assert!(north.is_vertex_center());
    /// assert!(mesh.parse_hash("1|999|0").is_err());
    /// # Ok::<(), grid_icosa::GridError>(())
    /// ```
    pub fn parse_hash(&self, hash: &str) -> GridResult<(Self, GridPoint)> {
        let key: HashKey = hash.parse()?;
        let config = self.config();
        let mesh = if key.orientation == config.orientation && key.projection == config.projection {
            self.clone()
        } else {
            Self::new(
                config
                    .clone()
                    .with_orientation(key.orientation)
                    .with_projection(key.projection),
            )?
        };

        let point = mesh.point_at(key.row, key.col, key.resolution)?;
        debug!("Parsed hash {} to {:?}", hash, point.position());
        Ok((mesh, point))
    }
}

/// Parse a hash with the default configuration.
///
/// # Errors
///
/// See [`IcosahedronMesh::parse_hash`].
pub fn parse_hash(hash: &str) -> GridResult<(IcosahedronMesh, GridPoint)> {
    IcosahedronMesh::new(crate::config::GridConfig::default())?.parse_hash(hash)
}
