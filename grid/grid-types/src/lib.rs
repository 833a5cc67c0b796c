//! Core types for the icosahedral phex grid.
//!
//! This crate provides the primitives shared by the grid crates:
//!
//! - [`Point`] - A location in 3-space with a vertex/phex-center flag
//! - [`GridPoint`] - A point addressed by resolution, row and column
//! - [`Resolution`] - The subdivision level and the address space it defines
//! - Vector and quaternion helpers ([`angle_between`], [`rotate_about_axis`], [`spherify`])
//! - Geographic conversion ([`from_coordinates`])
//! - Address arithmetic ([`is_phex_center`], [`point_num`])
//!
//! # Layer 0 Crate
//!
//! No I/O and no global state. All coordinates are `f64` and all
//! functions are pure.
//!
//! # Coordinate System
//!
//! Right-handed, centered on the sphere. The north pole lies on `+Z` and
//! latitude/longitude `(0, 0)` lies on `+X`.
//!
//! # Example
//!
//! ```
//! use grid_types::{GridPoint, Resolution, from_coordinates, is_phex_center, point_num};
//!
//! let res = Resolution::new(1)?;
//! let pole = from_coordinates(90.0, 0.0, 250.0)?.with_vertex_center(true);
//! let gp = GridPoint::new(pole, res, 0, 0);
//!
//! assert_eq!(gp.hash(), "1|0|0");
//! assert_eq!(point_num(&gp), 0);
//! assert!(is_phex_center(gp.row, gp.col, res));
//! # Ok::<(), grid_types::TypesError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod geo;
mod point;
mod resolution;
mod search;
mod vector;

pub use error::{TypesError, TypesResult};
pub use geo::from_coordinates;
pub use point::{GridPoint, Point, spherify_grid, spherify_row};
pub use resolution::{Resolution, is_phex_center, point_num};
pub use search::{closest_center, closest_point};
pub use vector::{
    angle_between, is_valid, on_opposite_sides, orthogonal, perpendicular, project,
    rotate_about_axis, rotate_around_y, spherify, unit, with_magnitude,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
