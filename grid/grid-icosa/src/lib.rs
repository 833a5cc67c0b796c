//! Icosahedral discrete global grid.
//!
//! This crate tessellates a sphere by subdividing the 20 faces of an
//! icosahedron and maps between 3D points and compact grid addresses:
//!
//! - **Mesh**: [`IcosahedronMesh`] builds the fixed 20-face solid with its
//!   adjacency from a [`GridConfig`]
//! - **Generation**: the full grid ([`IcosahedronMesh::all_points`]) or a
//!   small window around a point ([`generate_points_lazy`])
//! - **Hashing**: [`IcosahedronMesh::generate_hash`] snaps a point to its
//!   nearest phex center and [`IcosahedronMesh::parse_hash`] recovers the
//!   exact point from a `resolution|row|col` hash
//! - **Cells**: [`generate_all_phexes`] derives the hexagon and pentagon
//!   cells of a grid
//!
//! # Resolution
//!
//! A resolution `r` splits each face edge into `nd = 3r` divisions. The
//! grid has `3nd + 1` rows from pole to pole and `10nd² + 2` points.
//!
//! # Example
//!
//! ```
//! use grid_icosa::{GridConfig, IcosahedronMesh};
//! use grid_types::Resolution;
//!
//! let mesh = IcosahedronMesh::new(GridConfig::default())?;
//! let res = Resolution::new(4)?;
//!
//! let hash = mesh.hash_coordinates(51.5, -0.12, res)?;
//! let (_, center) = mesh.parse_hash(&hash)?;
//!
//! assert_eq!(center.hash(), hash);
//! assert!(center.is_vertex_center());
//! # Ok::<(), grid_icosa::GridError>(())
//! ```
//!
//! Unsupported configurations fail when the mesh is built:
//!
//! ```
//! use grid_icosa::{GridConfig, IcosahedronMesh, Projection};
//!
//! let quaternion = GridConfig::new().with_projection(Projection::Quaternion);
//! let err = IcosahedronMesh::new(quaternion).unwrap_err();
//! assert!(err.is_configuration());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod address;
mod config;
mod error;
mod generate;
mod grid;
mod hash;
mod icosahedron;
mod phex;
mod projection;
mod triangle;

pub use address::{LocalAddress, global_address, local_address};
pub use config::{
    DEFAULT_LAZY_RANGE, DEFAULT_RADIUS, GOLDEN_RATIO, GridConfig, Orientation, Projection,
};
pub use error::{GridError, GridResult, HashFormatError};
pub use generate::{
    LazyWindow, WindowRow, generate_all_points, generate_point, generate_points_lazy,
    row_divisions,
};
pub use grid::PointGrid;
pub use hash::{HashKey, parse_hash};
pub use icosahedron::IcosahedronMesh;
pub use phex::{
    Phex, generate_all_phexes, generate_phex_centers, surrounding_addresses, surrounding_points,
};
pub use triangle::{Pointing, Region, Triangle, area, plane_intersection};
