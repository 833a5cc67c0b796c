//! Nearest-point search over candidate grid points.

use nalgebra::Point3;

use crate::point::GridPoint;

/// Candidate nearest to `target`, or `None` for an empty slice.
#[must_use]
pub fn closest_point<'a>(target: &Point3<f64>, candidates: &'a [GridPoint]) -> Option<&'a GridPoint> {
    nearest(target, candidates.iter())
}

/// Vertex/phex-center candidate nearest to `target`.
///
/// Candidates without `is_vertex_center` are ignored. Returns `None` when no
/// candidate is a center.
///
/// # Example
///
/// ```
/// use grid_types::{GridPoint, Point, Point3, Resolution, closest_center};
///
/// let res = Resolution::new(1)?;
/// let near = GridPoint::new(Point::from_coords(1.0, 0.0, 0.0), res, 1, 0);
/// let center = GridPoint::new(Point::from_coords(5.0, 0.0, 0.0).with_vertex_center(true), res, 2, 1);
/// let candidates = [near, center];
/// let found = closest_center(&Point3::origin(), &candidates);
/// assert_eq!(found.map(|p| (p.row, p.col)), Some((2, 1)));
/// # Ok::<(), grid_types::TypesError>(())
/// ```
#[must_use]
pub fn closest_center<'a>(
    target: &Point3<f64>,
    candidates: &'a [GridPoint],
) -> Option<&'a GridPoint> {
    nearest(target, candidates.iter().filter(|p| p.is_vertex_center()))
}

fn nearest<'a>(
    target: &Point3<f64>,
    candidates: impl Iterator<Item = &'a GridPoint>,
) -> Option<&'a GridPoint> {
    candidates
        .map(|p| (nalgebra::distance_squared(p.position(), target), p))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, p)| p)
}
