//! Point placement along face edges and rows.
//!
//! A face is filled by walking two of its edges ("sides") in `nd` steps and
//! then filling each row between the two side points. The projection decides
//! how a step is taken:
//!
//! - Gnomonic: both endpoints are pushed out onto a plane tangent to the
//!   sphere near the edge midpoint and the step is linear on that plane.
//!   Callers rescale the results back onto the sphere.
//! - Quaternion: the step is a fixed angle of rotation along the great
//!   circle through both endpoints, which stays on the sphere.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::PI;

use grid_types::{angle_between, rotate_about_axis, unit, with_magnitude};
use nalgebra::Vector3;

use crate::config::Projection;
use crate::error::{GridError, GridResult};
use crate::triangle::{Triangle, plane_intersection};

/// Evenly stepped points between two endpoints.
///
/// Index `0` and index `divisions` return the endpoints exactly.
#[derive(Debug, Clone)]
pub(crate) enum Segment {
    /// Zero-length segment.
    Single(Vector3<f64>),
    /// Straight steps of `step` along `direction`.
    Linear {
        start: Vector3<f64>,
        end: Vector3<f64>,
        direction: Vector3<f64>,
        step: f64,
        divisions: usize,
    },
    /// Rotations of `step` radians around `axis`.
    Arc {
        start: Vector3<f64>,
        end: Vector3<f64>,
        axis: Vector3<f64>,
        step: f64,
        divisions: usize,
    },
}

impl Segment {
    /// A face side from `top` to `bottom` in `divisions` steps.
    pub(crate) fn side(
        top: &Vector3<f64>,
        bottom: &Vector3<f64>,
        divisions: usize,
        projection: Projection,
        radius: f64,
    ) -> Self {
        match projection {
            Projection::Gnomonic => {
                let chord = bottom - top;
                let direction = unit(&chord);
                let mid = top + direction * (chord.norm() / 2.0);
                let center = with_magnitude(&mid, radius);
                let alpha = angle_between(top, &center);
                let height = center.norm() / alpha.cos();

                let start = with_magnitude(top, height);
                let end = with_magnitude(bottom, height);
                let step = (end - start).norm() / divisions as f64;
                Self::Linear {
                    start,
                    end,
                    direction,
                    step,
                    divisions,
                }
            }
            Projection::Quaternion => Self::arc(top, bottom, divisions),
        }
    }

    /// A row from `left` to `right` in `divisions` steps.
    pub(crate) fn row(
        left: &Vector3<f64>,
        right: &Vector3<f64>,
        divisions: usize,
        projection: Projection,
    ) -> Self {
        if divisions == 0 {
            return Self::Single(*left);
        }
        match projection {
            Projection::Gnomonic => {
                let span = right - left;
                Self::Linear {
                    start: *left,
                    end: *right,
                    direction: unit(&span),
                    step: span.norm() / divisions as f64,
                    divisions,
                }
            }
            Projection::Quaternion => Self::arc(left, right, divisions),
        }
    }

    fn arc(start: &Vector3<f64>, end: &Vector3<f64>, divisions: usize) -> Self {
        Self::Arc {
            start: *start,
            end: *end,
            axis: start.cross(end),
            step: angle_between(start, end) / divisions as f64,
            divisions,
        }
    }

    /// Point at step `index`.
    pub(crate) fn at(&self, index: usize) -> Vector3<f64> {
        match self {
            Self::Single(p) => *p,
            Self::Linear {
                start,
                end,
                direction,
                step,
                divisions,
            } => {
                if index == 0 {
                    *start
                } else if index == *divisions {
                    *end
                } else {
                    start + direction * (step * index as f64)
                }
            }
            Self::Arc {
                start,
                end,
                axis,
                step,
                divisions,
            } => {
                if index == 0 {
                    *start
                } else if index == *divisions {
                    *end
                } else {
                    rotate_about_axis(start, axis, step * index as f64)
                }
            }
        }
    }
}

/// Fractions locating `point` along a face's CA and CB edges.
///
/// The face and the point are projected onto the same plane the gnomonic
/// sides use, and the projected point is split into components along both
/// edges from vertex C with the law of sines. Both fractions are relative
/// to the length of edge AB.
///
/// # Errors
///
/// Returns [`GridError::ProjectionNotReady`] for quaternion projection.
pub(crate) fn face_percents(
    triangle: &Triangle,
    point: &Vector3<f64>,
    projection: Projection,
    radius: f64,
) -> GridResult<(f64, f64)> {
    match projection {
        Projection::Gnomonic => Ok(gnomonic_percents(triangle, point, radius)),
        Projection::Quaternion => Err(GridError::ProjectionNotReady {
            projection,
            operation: "locating a point within a face",
        }),
    }
}

fn gnomonic_percents(triangle: &Triangle, point: &Vector3<f64>, radius: f64) -> (f64, f64) {
    let (a, b, c) = (&triangle.a.coords, &triangle.b.coords, &triangle.c.coords);

    let mid_ab = a + (b - a) / 2.0;
    let centroid = c + (mid_ab - c) * (2.0 / 3.0);
    let center = with_magnitude(&centroid, radius);
    let alpha = angle_between(c, &center);
    let height = center.norm() / alpha.cos();

    let a = with_magnitude(a, height);
    let b = with_magnitude(b, height);
    let c = with_magnitude(c, height);
    let hit = plane_intersection(&a, &b, &c, point);

    let unit_ca = unit(&(a - c));
    let unit_cb = unit(&(b - c));
    let c_hit = hit - c;
    let beta = angle_between(&unit_ca, &c_hit);
    let gamma = angle_between(&c_hit, &unit_cb);
    let phi = PI - beta - gamma;

    let len = c_hit.norm();
    let along_cb = len * beta.sin() / phi.sin();
    let along_ca = len * gamma.sin() / phi.sin();
    let edge = (b - a).norm();
    (along_ca / edge, along_cb / edge)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::icosahedron::IcosahedronMesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_endpoints_exact() {
        let left = Vector3::new(1.0, 2.0, 3.0);
        let right = Vector3::new(4.0, -2.0, 3.0);
        let row = Segment::row(&left, &right, 5, Projection::Gnomonic);
        assert_eq!(row.at(0), left);
        assert_eq!(row.at(5), right);
        assert_relative_eq!(row.at(1), Vector3::new(1.6, 1.2, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_division_row() {
        let p = Vector3::new(0.0, 0.0, 1.0);
        let row = Segment::row(&p, &Vector3::new(1.0, 0.0, 0.0), 0, Projection::Quaternion);
        assert_eq!(row.at(0), p);
    }

    #[test]
    fn test_arc_stays_on_sphere() {
        let start = Vector3::new(250.0, 0.0, 0.0);
        let end = Vector3::new(0.0, 0.0, 250.0);
        let arc = Segment::row(&start, &end, 9, Projection::Quaternion);
        for i in 0..=9 {
            assert_relative_eq!(arc.at(i).norm(), 250.0, epsilon = 1e-9);
        }
        let mid = arc.at(3);
        assert_relative_eq!(
            angle_between(&start, &mid),
            std::f64::consts::FRAC_PI_6,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_gnomonic_side_is_evenly_spaced() {
        let mesh = IcosahedronMesh::new(GridConfig::default()).unwrap();
        let t = &mesh.triangles()[0];
        let side = Segment::side(&t.a.coords, &t.b.coords, 6, Projection::Gnomonic, 250.0);
        let gaps: Vec<f64> = (0..6).map(|i| (side.at(i + 1) - side.at(i)).norm()).collect();
        for gap in &gaps {
            assert_relative_eq!(*gap, gaps[0], epsilon = 1e-9);
        }
        // pushed outward, beyond the sphere
        assert!(side.at(0).norm() > 250.0);
    }

    #[test]
    fn test_percents_at_face_corners() {
        let mesh = IcosahedronMesh::new(GridConfig::default()).unwrap();
        let t = &mesh.triangles()[3];
        let (ca, cb) = gnomonic_percents(t, &t.a.coords, 250.0);
        assert_relative_eq!(ca, 1.0, epsilon = 1e-6);
        assert_relative_eq!(cb, 0.0, epsilon = 1e-6);
        let (ca, cb) = gnomonic_percents(t, &t.b.coords, 250.0);
        assert_relative_eq!(ca, 0.0, epsilon = 1e-6);
        assert_relative_eq!(cb, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quaternion_percents_not_ready() {
        let mesh = IcosahedronMesh::new(GridConfig::default()).unwrap();
        let t = &mesh.triangles()[0];
        let err = face_percents(t, &t.a.coords, Projection::Quaternion, 250.0);
        assert!(matches!(err, Err(GridError::ProjectionNotReady { .. })));
    }
}
