//! Icosahedron faces and the plane geometry used to locate points on them.

use grid_types::{is_valid, on_opposite_sides};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Area slack above which a sub-triangle rules containment out early.
const AREA_SLACK: f64 = 0.01;

/// Decimal scale areas are rounded to before the coverage comparison.
const AREA_PRECISION: f64 = 1e6;

/// Which way a face points in the row layout.
///
/// An up face widens from a single apex point at local row 0 to its base at
/// row `nd`. A down face starts at its base and narrows to the apex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pointing {
    /// Apex first.
    Up,
    /// Base first.
    Down,
}

/// Band of the icosahedron a face belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    /// Faces 0-4, around the north pole.
    TopCap,
    /// Faces 5-14, alternating down/up.
    Equator,
    /// Faces 15-19, around the south pole.
    BottomCap,
}

impl Region {
    /// Global row offset of this band's local row 0, given `nd` divisions.
    #[must_use]
    pub const fn row_offset(self, divisions: usize) -> usize {
        match self {
            Self::TopCap => 0,
            Self::Equator => divisions,
            Self::BottomCap => 2 * divisions,
        }
    }
}

/// One face of the icosahedron.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Face id, 0-19.
    pub id: usize,
    /// First vertex.
    pub a: Point3<f64>,
    /// Second vertex.
    pub b: Point3<f64>,
    /// Third vertex.
    pub c: Point3<f64>,
    /// Row layout direction.
    pub pointing: Pointing,
    /// Band of the solid.
    pub region: Region,
    /// Face sharing edge AB.
    pub neighbor_ab: usize,
    /// Face sharing edge BC.
    pub neighbor_bc: usize,
    /// Face sharing edge CA.
    pub neighbor_ca: usize,
}

impl Triangle {
    /// The three vertices in order.
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Neighbor ids across AB, BC and CA.
    #[must_use]
    pub const fn neighbors(&self) -> [usize; 3] {
        [self.neighbor_ab, self.neighbor_bc, self.neighbor_ca]
    }

    /// Whether this face points up.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.pointing == Pointing::Up
    }

    /// Area of the flat face.
    #[must_use]
    pub fn area(&self) -> f64 {
        area(&self.a.coords, &self.b.coords, &self.c.coords)
    }

    /// Centroid of the flat face.
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Where the ray from the origin through `direction` meets this face's plane.
    ///
    /// Non-finite when the ray is parallel to the plane.
    #[must_use]
    pub fn plane_intersection(&self, direction: &Vector3<f64>) -> Vector3<f64> {
        plane_intersection(&self.a.coords, &self.b.coords, &self.c.coords, direction)
    }

    /// Whether the ray from the origin through `point` passes through this face.
    ///
    /// The test projects `point` onto the face plane and compares the face
    /// area with the three sub-areas the projection makes with each edge.
    /// Projections landing in another half space of any axis are rejected
    /// first.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_icosa::{GridConfig, IcosahedronMesh};
    /// use nalgebra::Vector3;
    ///
    /// let mesh = IcosahedronMesh::new(GridConfig::default())?;
    /// let north = Vector3::new(0.0, 0.0, 250.0);
    /// assert!(mesh.triangles()[0].contains_point(&north));
    /// assert!(!mesh.triangles()[19].contains_point(&north));
    /// # Ok::<(), grid_icosa::GridError>(())
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains_point(&self, point: &Vector3<f64>) -> bool {
        let hit = self.plane_intersection(point);
        if on_opposite_sides(point, &hit) || !is_valid(&hit) {
            return false;
        }

        let (a, b, c) = (&self.a.coords, &self.b.coords, &self.c.coords);
        let total = area(a, b, c);
        let limit = total + AREA_SLACK;

        let mut sum = 0.0;
        for sub in [area(a, b, &hit), area(&hit, b, c), area(a, &hit, c)] {
            if sub > limit {
                return false;
            }
            sum += sub;
        }

        // rounded to a fixed precision, so exact comparison is intended
        (total * AREA_PRECISION).round() == (sum * AREA_PRECISION).round()
    }
}

/// Area of the triangle `abc`.
#[must_use]
pub fn area(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    (b - a).cross(&(c - b)).norm() / 2.0
}

/// Intersection of the ray from the origin along `v` with the plane through `a`, `b`, `c`.
#[must_use]
pub fn plane_intersection(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
    v: &Vector3<f64>,
) -> Vector3<f64> {
    let normal = (a - b).cross(&(c - b));
    let t = normal.dot(a) / normal.dot(v);
    v * t
}
