//! The base icosahedron and grid generation across all 20 faces.

use std::sync::Arc;

use grid_types::{GridPoint, Point, Resolution, is_phex_center, rotate_around_y};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::address::{global_address, local_address};
use crate::config::{GridConfig, Projection};
use crate::error::{GridError, GridResult};
use crate::generate::{generate_all_points, generate_point, generate_points_lazy};
use crate::grid::PointGrid;
use crate::triangle::{Pointing, Region, Triangle};

use Pointing::{Down, Up};
use Region::{BottomCap as Bot, Equator as Mid, TopCap as Top};

/// Vertex indices: north pole, top ring, bottom ring, south pole.
const NORTH: usize = 0;
const T1: usize = 1;
const T2: usize = 2;
const T3: usize = 3;
const T4: usize = 4;
const T5: usize = 5;
const B1: usize = 6;
const B2: usize = 7;
const B3: usize = 8;
const B4: usize = 9;
const B5: usize = 10;
const SOUTH: usize = 11;

/// Face layout: vertices `[A, B, C]`, pointing, region, neighbors across `[AB, BC, CA]`.
type FaceRow = ([usize; 3], Pointing, Region, [usize; 3]);

#[rustfmt::skip]
const FACES: [FaceRow; 20] = [
    ([NORTH, T2, T1],   Up,   Top, [1, 5, 4]),
    ([NORTH, T3, T2],   Up,   Top, [2, 7, 0]),
    ([NORTH, T4, T3],   Up,   Top, [3, 9, 1]),
    ([NORTH, T5, T4],   Up,   Top, [4, 11, 2]),
    ([NORTH, T1, T5],   Up,   Top, [0, 13, 3]),
    ([B1, T1, T2],      Down, Mid, [14, 0, 6]),
    ([T2, B2, B1],      Up,   Mid, [7, 15, 5]),
    ([B2, T2, T3],      Down, Mid, [6, 1, 8]),
    ([T3, B3, B2],      Up,   Mid, [9, 16, 7]),
    ([B3, T3, T4],      Down, Mid, [8, 2, 10]),
    ([T4, B4, B3],      Up,   Mid, [11, 17, 9]),
    ([B4, T4, T5],      Down, Mid, [10, 3, 12]),
    ([T5, B5, B4],      Up,   Mid, [13, 18, 11]),
    ([B5, T5, T1],      Down, Mid, [12, 4, 14]),
    ([T1, B1, B5],      Up,   Mid, [5, 19, 13]),
    ([SOUTH, B1, B2],   Down, Bot, [19, 6, 16]),
    ([SOUTH, B2, B3],   Down, Bot, [15, 8, 17]),
    ([SOUTH, B3, B4],   Down, Bot, [16, 10, 18]),
    ([SOUTH, B4, B5],   Down, Bot, [17, 12, 19]),
    ([SOUTH, B5, B1],   Down, Bot, [18, 14, 15]),
];

/// The 12 vertices on a sphere of `radius`, north vertex on `+Z`.
fn base_vertices(radius: f64, ratio: f64) -> [Vector3<f64>; 12] {
    let a = radius / ratio.mul_add(ratio, 1.0).sqrt();
    let g = ratio * a;
    let tilt = -(ratio / ratio.mul_add(ratio, 1.0).sqrt()).acos();

    #[rustfmt::skip]
    let raw = [
        [a, 0.0, g],
        [g, -a, 0.0], [g, a, 0.0], [0.0, g, a], [-a, 0.0, g], [0.0, -g, a],
        [a, 0.0, -g], [0.0, g, -a], [-g, a, 0.0], [-g, -a, 0.0], [0.0, -g, -a],
        [-a, 0.0, -g],
    ];
    raw.map(|[x, y, z]| rotate_around_y(&Vector3::new(x, y, z), tilt))
}

/// The 20-face solid a grid is built on.
///
/// Construction is deterministic: the faces and their adjacency are fixed,
/// only the radius and vertex ratio come from the configuration. One mesh
/// fully determines hashing and decoding.
#[derive(Debug, Clone)]
pub struct IcosahedronMesh {
    config: GridConfig,
    triangles: Arc<[Triangle]>,
}

impl IcosahedronMesh {
    /// Build the mesh.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for dymaxion orientation, for quaternion
    /// projection without `allow_quaternion`, or for a non-positive radius.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_icosa::{GridConfig, IcosahedronMesh, Orientation};
    ///
    /// let mesh = IcosahedronMesh::new(GridConfig::default())?;
    /// assert_eq!(mesh.triangles().len(), 20);
    ///
    /// let dymaxion = GridConfig::new().with_orientation(Orientation::Dymaxion);
    /// assert!(IcosahedronMesh::new(dymaxion).is_err());
    /// # Ok::<(), grid_icosa::GridError>(())
    /// ```
    pub fn new(config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        if config.projection == Projection::Quaternion {
            warn!("Quaternion projection enabled by override; hashing points will fail");
        }

        let vertices = base_vertices(config.radius, config.golden_ratio);
        let triangles: Arc<[Triangle]> = FACES
            .iter()
            .enumerate()
            .map(|(id, &([a, b, c], pointing, region, [ab, bc, ca]))| Triangle {
                id,
                a: Point3::from(vertices[a]),
                b: Point3::from(vertices[b]),
                c: Point3::from(vertices[c]),
                pointing,
                region,
                neighbor_ab: ab,
                neighbor_bc: bc,
                neighbor_ca: ca,
            })
            .collect();

        debug!(
            "Built icosahedron: orientation {}, projection {}, radius {}",
            config.orientation, config.projection, config.radius
        );
        Ok(Self { config, triangles })
    }

    /// Configuration the mesh was built from.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The 20 faces in id order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Face by id.
    #[must_use]
    pub fn triangle(&self, id: usize) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    /// First face whose containment test accepts `point`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoContainingTriangle`] when round-off near an edge
    /// or vertex makes every face reject the point. Callers may retry with a
    /// perturbed point.
    pub fn containing_triangle(&self, point: &Point3<f64>) -> GridResult<&Triangle> {
        self.triangles
            .iter()
            .find(|t| t.contains_point(&point.coords))
            .ok_or_else(|| {
                warn!("No containing triangle for point {:?}", point);
                GridError::no_containing_triangle(point)
            })
    }

    /// Every point of the grid at `resolution`, addressed by `[row][col]`.
    ///
    /// Faces are generated independently (in parallel when
    /// `config.parallel` is set) and merged in id order. Each face gives up
    /// the last point of every row to its eastern neighbor; face 0 keeps the
    /// north pole and face 19 keeps the south pole. Only the 12 icosahedron
    /// vertices are flagged as vertex centers.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_icosa::{GridConfig, IcosahedronMesh};
    /// use grid_types::Resolution;
    ///
    /// let mesh = IcosahedronMesh::new(GridConfig::default())?;
    /// let grid = mesh.all_points(Resolution::new(1)?);
    ///
    /// assert_eq!(grid.row_count(), 10);
    /// assert_eq!(grid.len(), 92);
    /// # Ok::<(), grid_icosa::GridError>(())
    /// ```
    #[must_use]
    pub fn all_points(&self, resolution: Resolution) -> PointGrid {
        let nd = resolution.divisions();
        let faces: Vec<Vec<Vec<Point>>> = if self.config.parallel {
            self.triangles
                .par_iter()
                .map(|t| generate_all_points(t, resolution, &self.config))
                .collect()
        } else {
            self.triangles
                .iter()
                .map(|t| generate_all_points(t, resolution, &self.config))
                .collect()
        };

        let mut rows: Vec<Vec<GridPoint>> = (0..resolution.row_count())
            .map(|row| Vec::with_capacity(resolution.row_width(row)))
            .collect();

        for (t, face) in self.triangles.iter().zip(faces) {
            let offset = t.region.row_offset(nd);
            let taken = if t.region == Region::BottomCap { nd + 1 } else { nd };

            for (local_row, points) in face.into_iter().take(taken).enumerate() {
                let owns_pole = (t.id == 0 && local_row == 0) || (t.id == 19 && local_row == nd);
                let keep = if owns_pole {
                    points.len()
                } else {
                    points.len().saturating_sub(1)
                };

                let row = offset + local_row;
                let target = &mut rows[row];
                for point in points.into_iter().take(keep) {
                    let col = target.len();
                    target.push(GridPoint::new(point, resolution, row, col));
                }
            }
        }

        debug!(
            "Generated grid at resolution {}: {} rows, {} points (parallel: {})",
            resolution,
            rows.len(),
            resolution.point_count(),
            self.config.parallel
        );
        PointGrid::new(resolution, rows)
    }

    /// Grid points near `point`, addressed globally.
    ///
    /// Finds the containing face, generates a lazy window there and converts
    /// every window point to its global row/col. Points are flagged as
    /// vertex centers when their address is a phex center.
    ///
    /// # Errors
    ///
    /// Returns a geometry error when no face contains the point, and
    /// [`GridError::ProjectionNotReady`] for quaternion projection.
    pub fn points_around_lazy(
        &self,
        point: &Point3<f64>,
        resolution: Resolution,
    ) -> GridResult<Vec<GridPoint>> {
        let triangle = self.containing_triangle(point)?;
        let window = generate_points_lazy(triangle, &point.coords, resolution, &self.config)?;

        Ok(window
            .iter()
            .map(|(local_row, local_col, p)| {
                let (row, col) = global_address(triangle, local_row, local_col, resolution);
                let flagged = p.with_vertex_center(is_phex_center(row, col, resolution));
                GridPoint::new(flagged, resolution, row, col)
            })
            .collect())
    }

    /// The grid point at global `(row, col)`, generated on its own.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::AddressOutOfGrid`] when the address does not exist
    /// at `resolution`.
    pub fn point_at(&self, row: usize, col: usize, resolution: Resolution) -> GridResult<GridPoint> {
        if !resolution.contains(row, col) {
            return Err(GridError::AddressOutOfGrid {
                row,
                col,
                resolution: resolution.get(),
            });
        }
        let local = local_address(row, col, resolution);
        let triangle = &self.triangles[local.triangle];
        let point = generate_point(triangle, local.row, local.col, resolution, &self.config)
            .with_vertex_center(is_phex_center(row, col, resolution));
        Ok(GridPoint::new(point, resolution, row, col))
    }
}
