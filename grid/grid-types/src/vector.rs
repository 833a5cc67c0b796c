//! Vector and quaternion arithmetic used to place grid points.
//!
//! Plain arithmetic (add, subtract, scale, dot, cross, magnitude) comes from
//! nalgebra's operators on [`Vector3`]. This module adds the operations the
//! grid needs on top of that: clamped angles, projections, quaternion
//! rotation and rescaling onto the sphere.

use nalgebra::{Quaternion, Vector3};

/// Angle between two vectors in radians.
///
/// The cosine is clamped to `[-1, 1]` so round-off on (anti)parallel inputs
/// cannot push `acos` out of its domain.
///
/// # Example
///
/// ```
/// use grid_types::{Vector3, angle_between};
///
/// let a = Vector3::new(1.0, 0.0, 0.0);
/// let b = Vector3::new(0.0, 2.0, 0.0);
/// assert!((angle_between(&a, &b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[must_use]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let inner = a.dot(b) / (a.norm() * b.norm());
    inner.clamp(-1.0, 1.0).acos()
}

/// Unit vector in the direction of `v`.
///
/// `v` must be non-zero; a zero vector yields non-finite components.
#[inline]
#[must_use]
pub fn unit(v: &Vector3<f64>) -> Vector3<f64> {
    v / v.norm()
}

/// Vector with the direction of `v` and the given magnitude.
#[inline]
#[must_use]
pub fn with_magnitude(v: &Vector3<f64>, magnitude: f64) -> Vector3<f64> {
    unit(v) * magnitude
}

/// Projection of `a` onto `onto`.
#[must_use]
pub fn project(a: &Vector3<f64>, onto: &Vector3<f64>) -> Vector3<f64> {
    let onto_unit = unit(onto);
    onto_unit * a.dot(&onto_unit)
}

/// Vector orthogonal to both inputs.
///
/// Viewing both vectors as coming towards the observer, the result points to
/// the right of `above` relative to `below`.
#[inline]
#[must_use]
pub fn orthogonal(above: &Vector3<f64>, below: &Vector3<f64>) -> Vector3<f64> {
    above.cross(below)
}

/// Vector in the plane of `a` and `b` that is perpendicular to `a`.
#[must_use]
pub fn perpendicular(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    unit(&a.cross(b)).cross(a)
}

/// True when every component is finite.
#[inline]
#[must_use]
pub fn is_valid(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Sign of a component as `-1`, `0` or `1`. Both zeros map to `0`.
#[inline]
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Loose test for two vectors lying in different octant-aligned half spaces.
///
/// Returns `true` when any coordinate differs in sign. This is an
/// approximation of "90 degrees or more apart", not an exact angular test.
#[must_use]
pub fn on_opposite_sides(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    a.iter().zip(b.iter()).any(|(x, y)| sign(*x) != sign(*y))
}

/// Rotate `v` by `radians` around `axis` using quaternion conjugation `q·v·q⁻¹`.
///
/// The axis is normalized first, so any non-zero length works.
///
/// # Example
///
/// ```
/// use grid_types::{Vector3, rotate_about_axis};
///
/// let x = Vector3::new(1.0, 0.0, 0.0);
/// let z = Vector3::new(0.0, 0.0, 5.0);
/// let y = rotate_about_axis(&x, &z, std::f64::consts::FRAC_PI_2);
/// assert!((y - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn rotate_about_axis(v: &Vector3<f64>, axis: &Vector3<f64>, radians: f64) -> Vector3<f64> {
    let axis = unit(axis);
    let (s, w) = (radians / 2.0).sin_cos();
    let q = Quaternion::from_parts(w, axis * s);
    let q_inv = Quaternion::from_parts(w, axis * -s);
    let p = Quaternion::from_parts(0.0, *v);
    (q * p * q_inv).imag()
}

/// Rotate `v` around the Y axis by `radians`.
#[must_use]
pub fn rotate_around_y(v: &Vector3<f64>, radians: f64) -> Vector3<f64> {
    let (sin, cos) = radians.sin_cos();
    Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Rescale `v` so it lies exactly on a sphere of `radius`.
#[inline]
#[must_use]
pub fn spherify(v: &Vector3<f64>, radius: f64) -> Vector3<f64> {
    with_magnitude(v, radius)
}
