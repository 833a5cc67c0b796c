//! Geographic coordinate conversion.

use nalgebra::Point3;

use crate::error::{TypesError, TypesResult};
use crate::point::Point;

/// Convert latitude/longitude in degrees to a point on a sphere of `radius`.
///
/// Uses the spherical geodetic-to-ECEF formula: the north pole maps to `+Z`
/// and `(0, 0)` maps to `+X`.
///
/// # Errors
///
/// Returns [`TypesError::LatitudeOutOfRange`] unless `lat` is in `[-90, 90]`
/// and [`TypesError::LongitudeOutOfRange`] unless `lon` is in `[-180, 180]`.
///
/// # Example
///
/// ```
/// use grid_types::from_coordinates;
///
/// let pole = from_coordinates(90.0, 0.0, 250.0)?;
/// assert!((pole.z() - 250.0).abs() < 1e-9);
/// assert!(from_coordinates(90.5, 0.0, 250.0).is_err());
/// # Ok::<(), grid_types::TypesError>(())
/// ```
pub fn from_coordinates(lat: f64, lon: f64, radius: f64) -> TypesResult<Point> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(TypesError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(TypesError::LongitudeOutOfRange(lon));
    }

    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    Ok(Point::new(Point3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )))
}
