//! Property-based tests for grid-types primitives.
//!
//! Run with: cargo test -p grid-types -- proptest

#![allow(clippy::unwrap_used)]

use grid_types::{
    GridPoint, Point, Resolution, Vector3, angle_between, from_coordinates, is_phex_center,
    point_num, rotate_about_axis,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_resolution() -> impl Strategy<Value = Resolution> {
    (1..=64u32).prop_map(|r| Resolution::new(r).unwrap())
}

/// A valid `(resolution, row, col)` address.
fn arb_address() -> impl Strategy<Value = (Resolution, usize, usize)> {
    arb_resolution().prop_flat_map(|res| {
        (0..res.row_count()).prop_flat_map(move |row| {
            (0..res.row_width(row)).prop_map(move |col| (res, row, col))
        })
    })
}

fn arb_direction() -> impl Strategy<Value = Vector3<f64>> {
    (-1.0..1.0f64, -1.0..1.0f64, -1.0..1.0f64)
        .prop_filter("non-degenerate", |(x, y, z)| x * x + y * y + z * z > 1e-3)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn grid_point(res: Resolution, row: usize, col: usize) -> GridPoint {
    GridPoint::new(Point::from_coords(0.0, 0.0, 0.0), res, row, col)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_point_num_in_range((res, row, col) in arb_address()) {
        prop_assert!(point_num(&grid_point(res, row, col)) < res.point_count());
    }

    #[test]
    fn proptest_point_num_is_consecutive((res, row, col) in arb_address()) {
        let here = point_num(&grid_point(res, row, col));
        let next = if col + 1 < res.row_width(row) {
            Some(grid_point(res, row, col + 1))
        } else if row < res.max_row() {
            Some(grid_point(res, row + 1, 0))
        } else {
            None
        };
        match next {
            Some(next) => prop_assert_eq!(point_num(&next), here + 1),
            None => prop_assert_eq!(here, res.point_count() - 1),
        }
    }

    #[test]
    fn proptest_contains_matches_row_width((res, row, col) in arb_address()) {
        prop_assert!(res.contains(row, col));
        prop_assert!(!res.contains(row, res.row_width(row)));
        prop_assert!(!res.contains(res.row_count(), 0));
    }

    #[test]
    fn proptest_poles_are_centers(res in arb_resolution()) {
        prop_assert!(is_phex_center(0, 0, res));
        prop_assert!(is_phex_center(res.max_row(), 0, res));
    }

    #[test]
    fn proptest_coordinates_on_sphere(
        lat in -90.0..=90.0f64,
        lon in -180.0..=180.0f64,
        radius in 1.0..1.0e4f64,
    ) {
        let p = from_coordinates(lat, lon, radius).unwrap();
        prop_assert!((p.magnitude() - radius).abs() < 1e-9 * radius);
        prop_assert!(((p.z() / radius).clamp(-1.0, 1.0).asin().to_degrees() - lat).abs() < 1e-5);
    }

    #[test]
    fn proptest_rotation_preserves_angle(
        v in arb_direction(),
        axis in arb_direction(),
        radians in -3.0..3.0f64,
    ) {
        let rotated = rotate_about_axis(&v, &axis, radians);
        prop_assert!((rotated.norm() - v.norm()).abs() < 1e-9);
        prop_assert!((angle_between(&rotated, &axis) - angle_between(&v, &axis)).abs() < 1e-6);
    }
}
