//! Per-face point generation: full, windowed and single point.
//!
//! Local rows run `0..=nd` from the face's first side endpoint. Row `x`
//! holds `x + 1` points on an up face and `nd − x + 1` on a down face.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use grid_types::{Point, Resolution, spherify};
use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::config::GridConfig;
use crate::error::GridResult;
use crate::projection::{Segment, face_percents};
use crate::triangle::{Pointing, Triangle};

/// Divisions in local row `row` of a face.
#[must_use]
pub const fn row_divisions(pointing: Pointing, divisions: usize, row: usize) -> usize {
    match pointing {
        Pointing::Up => row,
        Pointing::Down => divisions - row,
    }
}

/// Whether local `(row, col)` is one of the face's corners.
const fn is_face_corner(pointing: Pointing, divisions: usize, row: usize, col: usize) -> bool {
    let width = row_divisions(pointing, divisions, row);
    let (apex, base) = match pointing {
        Pointing::Up => (0, divisions),
        Pointing::Down => (divisions, 0),
    };
    row == apex || (row == base && (col == 0 || col == width))
}

/// Side walks used for the full grid.
///
/// Down faces start from B so rows share the column direction of their up
/// neighbors in the global layout.
fn full_sides(triangle: &Triangle, divisions: usize, config: &GridConfig) -> (Segment, Segment) {
    let (a, b, c) = (&triangle.a.coords, &triangle.b.coords, &triangle.c.coords);
    let (left, right) = match triangle.pointing {
        Pointing::Up => ((a, c), (a, b)),
        Pointing::Down => ((b, a), (c, a)),
    };
    sides(left, right, divisions, config)
}

/// Side walks used for windows and single points.
///
/// Down faces start from C, so local columns count away from the CA edge.
fn local_sides(triangle: &Triangle, divisions: usize, config: &GridConfig) -> (Segment, Segment) {
    let (a, b, c) = (&triangle.a.coords, &triangle.b.coords, &triangle.c.coords);
    let (left, right) = match triangle.pointing {
        Pointing::Up => ((a, c), (a, b)),
        Pointing::Down => ((c, a), (b, a)),
    };
    sides(left, right, divisions, config)
}

fn sides(
    left: (&Vector3<f64>, &Vector3<f64>),
    right: (&Vector3<f64>, &Vector3<f64>),
    divisions: usize,
    config: &GridConfig,
) -> (Segment, Segment) {
    (
        Segment::side(left.0, left.1, divisions, config.projection, config.radius),
        Segment::side(right.0, right.1, divisions, config.projection, config.radius),
    )
}

fn row_segment(
    triangle: &Triangle,
    sides: &(Segment, Segment),
    divisions: usize,
    row: usize,
    config: &GridConfig,
) -> Segment {
    Segment::row(
        &sides.0.at(row),
        &sides.1.at(row),
        row_divisions(triangle.pointing, divisions, row),
        config.projection,
    )
}

fn place(v: Vector3<f64>, config: &GridConfig) -> Point {
    let v = if config.projection.needs_spherify() {
        spherify(&v, config.radius)
    } else {
        v
    };
    Point::new(Point3::from(v))
}

/// Every point of one face, row by row.
///
/// The face corners are flagged as vertex centers. Gnomonic points are
/// rescaled onto the sphere.
///
/// # Example
///
/// ```
/// use grid_icosa::{GridConfig, IcosahedronMesh, generate_all_points};
/// use grid_types::Resolution;
///
/// let config = GridConfig::default();
/// let mesh = IcosahedronMesh::new(config.clone())?;
/// let rows = generate_all_points(&mesh.triangles()[0], Resolution::new(1)?, &config);
///
/// assert_eq!(rows.len(), 4);
/// assert_eq!(rows[3].len(), 4);
/// # Ok::<(), grid_icosa::GridError>(())
/// ```
#[must_use]
pub fn generate_all_points(
    triangle: &Triangle,
    resolution: Resolution,
    config: &GridConfig,
) -> Vec<Vec<Point>> {
    let nd = resolution.divisions();
    let sides = full_sides(triangle, nd, config);

    (0..=nd)
        .map(|row| {
            let segment = row_segment(triangle, &sides, nd, row, config);
            (0..=row_divisions(triangle.pointing, nd, row))
                .map(|col| {
                    place(segment.at(col), config)
                        .with_vertex_center(is_face_corner(triangle.pointing, nd, row, col))
                })
                .collect()
        })
        .collect()
}

/// One row of a [`LazyWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRow {
    /// Local row index on the face.
    pub row: usize,
    /// Local column of the first point.
    pub first_col: usize,
    /// Consecutive points starting at `first_col`.
    pub points: Vec<Point>,
}

impl WindowRow {
    /// Local `(col, point)` pairs of this row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point)> {
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (self.first_col + i, p))
    }
}

/// Points generated around an estimated location on one face.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyWindow {
    /// Face the window lies on.
    pub triangle: usize,
    /// Non-empty rows in ascending local order.
    pub rows: Vec<WindowRow>,
}

impl LazyWindow {
    /// First local row in the window, after clamping.
    #[must_use]
    pub fn lower_row(&self) -> Option<usize> {
        self.rows.first().map(|r| r.row)
    }

    /// Number of points in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(|r| r.points.len()).sum()
    }

    /// Whether the window holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.points.is_empty())
    }

    /// Local `(row, col, point)` triples, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Point)> {
        self.rows
            .iter()
            .flat_map(|r| r.iter().map(move |(col, p)| (r.row, col, p)))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn to_index(value: f64, max: usize) -> usize {
    value.round().clamp(0.0, max as f64) as usize
}

/// Points of one face near `point`, without generating the whole face.
///
/// The point's position along the face is estimated from its edge
/// fractions, rounded to a local row and column, and a window of
/// `config.lazy_half_width()` rows and columns on either side is generated.
/// Bounds are clamped to the face; each row records its own first column.
///
/// # Errors
///
/// Returns [`GridError::ProjectionNotReady`](crate::GridError::ProjectionNotReady)
/// for quaternion projection.
pub fn generate_points_lazy(
    triangle: &Triangle,
    point: &Vector3<f64>,
    resolution: Resolution,
    config: &GridConfig,
) -> GridResult<LazyWindow> {
    let nd = resolution.divisions();
    let (along_ca, along_cb) = face_percents(triangle, point, config.projection, config.radius)?;
    // a point exactly on C has no direction from C
    let (along_ca, along_cb) = (finite_or_zero(along_ca), finite_or_zero(along_cb));

    let ndf = nd as f64;
    let row_estimate = match triangle.pointing {
        Pointing::Up => to_index(ndf - along_ca * ndf, nd),
        Pointing::Down => to_index(along_ca * ndf, nd),
    };
    let col_estimate = to_index(along_cb * ndf, nd);

    let half = config.lazy_half_width();
    let lower = row_estimate.saturating_sub(half);
    let upper = (row_estimate + half).min(nd);
    trace!(
        "Lazy window on triangle {}: rows {}..={} around ({}, {})",
        triangle.id, lower, upper, row_estimate, col_estimate
    );

    let sides = local_sides(triangle, nd, config);
    let mut rows = Vec::with_capacity(upper - lower + 1);
    for row in lower..=upper {
        let width = row_divisions(triangle.pointing, nd, row);
        let (first, last) = if width == 0 {
            (0, 0)
        } else {
            (col_estimate.saturating_sub(half), (col_estimate + half).min(width))
        };
        if first > last {
            continue;
        }
        let segment = row_segment(triangle, &sides, nd, row, config);
        rows.push(WindowRow {
            row,
            first_col: first,
            points: (first..=last).map(|col| place(segment.at(col), config)).collect(),
        });
    }

    Ok(LazyWindow {
        triangle: triangle.id,
        rows,
    })
}

/// The single point at local `(row, col)` of a face, in window coordinates.
///
/// Matches the point [`generate_points_lazy`] would place at the same local
/// address. `row` must be in `0..=nd` and `col` within that row.
#[must_use]
pub fn generate_point(
    triangle: &Triangle,
    row: usize,
    col: usize,
    resolution: Resolution,
    config: &GridConfig,
) -> Point {
    let nd = resolution.divisions();
    let sides = local_sides(triangle, nd, config);
    place(row_segment(triangle, &sides, nd, row, config).at(col), config)
}
