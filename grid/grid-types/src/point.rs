//! Points on (or near) the grid sphere.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::resolution::Resolution;
use crate::vector;

/// A location in 3-space.
///
/// `is_vertex_center` marks a point that is an icosahedron vertex or a phex
/// center. Plain generated points leave it `false`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Position in Cartesian coordinates.
    pub position: Point3<f64>,
    /// Whether this point is a vertex or phex center.
    pub is_vertex_center: bool,
}

impl Point {
    /// Create a plain (non-center) point.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            is_vertex_center: false,
        }
    }

    /// Create a plain point from coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_types::Point;
    ///
    /// let p = Point::from_coords(1.0, 2.0, 3.0);
    /// assert!((p.y() - 2.0).abs() < f64::EPSILON);
    /// assert!(!p.is_vertex_center);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a point from a position vector.
    #[inline]
    #[must_use]
    pub fn from_vector(v: Vector3<f64>) -> Self {
        Self::new(Point3::from(v))
    }

    /// Create a point flagged as a vertex or phex center.
    #[inline]
    #[must_use]
    pub const fn vertex_center(position: Point3<f64>) -> Self {
        Self {
            position,
            is_vertex_center: true,
        }
    }

    /// Set the vertex-center flag.
    #[inline]
    #[must_use]
    pub const fn with_vertex_center(mut self, is_vertex_center: bool) -> Self {
        self.is_vertex_center = is_vertex_center;
        self
    }

    /// X coordinate.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y coordinate.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Z coordinate.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Position as a vector from the origin.
    #[inline]
    #[must_use]
    pub fn to_vector(&self) -> Vector3<f64> {
        self.position.coords
    }

    /// Distance from the origin.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.position.coords.norm()
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// True when all coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        vector::is_valid(&self.position.coords)
    }

    /// Copy of this point moved onto the sphere of `radius`.
    ///
    /// The vertex-center flag is preserved.
    #[must_use]
    pub fn spherify(&self, radius: f64) -> Self {
        Self {
            position: Point3::from(vector::spherify(&self.position.coords, radius)),
            is_vertex_center: self.is_vertex_center,
        }
    }
}

impl From<Point3<f64>> for Point {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

/// Rescale every point in a row onto the sphere of `radius`.
#[must_use]
pub fn spherify_row(points: &[Point], radius: f64) -> Vec<Point> {
    points.iter().map(|p| p.spherify(radius)).collect()
}

/// Rescale every point in a row-major grid onto the sphere of `radius`.
#[must_use]
pub fn spherify_grid(rows: &[Vec<Point>], radius: f64) -> Vec<Vec<Point>> {
    rows.iter().map(|row| spherify_row(row, radius)).collect()
}

/// A point addressed on the grid of a given resolution.
///
/// For resolution `r` with `nd = 3r` divisions, `row` lies in `0..=3nd` and
/// `col` in `0..5nd`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPoint {
    /// Location of the point.
    pub point: Point,
    /// Resolution of the grid the address belongs to.
    pub resolution: Resolution,
    /// Global row, counted from the north pole.
    pub row: usize,
    /// Column within the row.
    pub col: usize,
}

impl GridPoint {
    /// Create a grid point.
    #[inline]
    #[must_use]
    pub const fn new(point: Point, resolution: Resolution, row: usize, col: usize) -> Self {
        Self {
            point,
            resolution,
            row,
            col,
        }
    }

    /// Position of the point.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> &Point3<f64> {
        &self.point.position
    }

    /// Whether the point is a vertex or phex center.
    #[inline]
    #[must_use]
    pub const fn is_vertex_center(&self) -> bool {
        self.point.is_vertex_center
    }

    /// Three-field address `"{resolution}|{row}|{col}"`.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_types::{GridPoint, Point, Resolution};
    ///
    /// let res = Resolution::new(2)?;
    /// let gp = GridPoint::new(Point::from_coords(0.0, 0.0, 1.0), res, 4, 11);
    /// assert_eq!(gp.hash(), "2|4|11");
    /// # Ok::<(), grid_types::TypesError>(())
    /// ```
    #[must_use]
    pub fn hash(&self) -> String {
        format!("{}|{}|{}", self.resolution, self.row, self.col)
    }

    /// Distance to an arbitrary position.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, position: &Point3<f64>) -> f64 {
        nalgebra::distance(&self.point.position, position)
    }
}
