//! API regression tests for the grid crates.
//!
//! Organized in tiers of increasing complexity:
//!
//! - Tier 1: Foundation (grid-types primitives)
//! - Tier 2: Mesh construction and configuration
//! - Tier 3: Point generation
//! - Tier 4: Hashing
//! - Tier 5: Phex cells
//!
//! A failure here after an API change indicates a breaking change.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use grid_icosa::{
    GridConfig, GridError, HashFormatError, HashKey, IcosahedronMesh, Orientation, Projection,
    generate_all_phexes, generate_phex_centers, generate_points_lazy, surrounding_points,
};
use grid_types::{GridPoint, Point, Point3, Resolution, from_coordinates, point_num};

fn mesh() -> IcosahedronMesh {
    IcosahedronMesh::new(GridConfig::default()).expect("default mesh")
}

fn res(value: u32) -> Resolution {
    Resolution::new(value).expect("resolution")
}

// =============================================================================
// TIER 1: Foundation
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn resolution_dimensions() {
        let r = res(1);
        assert_eq!(r.divisions(), 3);
        assert_eq!(r.max_row(), 9);
        assert_eq!(r.max_col(), 14);
        assert_eq!(res(5).point_count(), 10 * 15 * 15 + 2);
        assert!(Resolution::new(0).is_err());
    }

    #[test]
    fn coordinates_validate_range() {
        let p = from_coordinates(0.0, 0.0, 250.0).unwrap();
        assert_relative_eq!(p.x(), 250.0, epsilon = 1e-9);
        assert!(from_coordinates(-91.0, 0.0, 250.0).is_err());
        assert!(from_coordinates(0.0, 181.0, 250.0).is_err());
    }

    #[test]
    fn point_num_spans_grid() {
        let r = res(2);
        let first = GridPoint::new(Point::from_coords(0.0, 0.0, 250.0), r, 0, 0);
        let last = GridPoint::new(Point::from_coords(0.0, 0.0, -250.0), r, r.max_row(), 0);
        assert_eq!(point_num(&first), 0);
        assert_eq!(point_num(&last), r.point_count() - 1);
    }
}

// =============================================================================
// TIER 2: Mesh construction
// =============================================================================

mod tier2_mesh {
    use super::*;

    #[test]
    fn default_mesh_has_twenty_faces() {
        let mesh = mesh();
        assert_eq!(mesh.triangles().len(), 20);
        assert_eq!(mesh.config().orientation, Orientation::Ecef);
        assert_eq!(mesh.config().projection, Projection::Gnomonic);
    }

    #[test]
    fn dymaxion_is_rejected() {
        let config = GridConfig::new().with_orientation(Orientation::Dymaxion);
        let err = IcosahedronMesh::new(config).unwrap_err();
        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("dymaxion"));
        assert!(message.contains("ECEF"));
    }

    #[test]
    fn quaternion_requires_override() {
        let config = GridConfig::new().with_projection(Projection::Quaternion);
        let err = IcosahedronMesh::new(config.clone()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("quaternion"));

        let mesh = IcosahedronMesh::new(config.with_allow_quaternion(true)).unwrap();
        assert_eq!(mesh.config().projection, Projection::Quaternion);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("ecef".parse::<Orientation>().unwrap(), Orientation::Ecef);
        assert_eq!("Quaternion".parse::<Projection>().unwrap(), Projection::Quaternion);
        assert!("polar".parse::<Orientation>().unwrap_err().is_configuration());
    }

    #[test]
    fn custom_radius_scales_grid() {
        let mesh = IcosahedronMesh::new(GridConfig::new().with_radius(1.0)).unwrap();
        let grid = mesh.all_points(res(1));
        for p in grid.iter() {
            assert_relative_eq!(p.point.magnitude(), 1.0, epsilon = 1e-9);
        }
    }
}

// =============================================================================
// TIER 3: Point generation
// =============================================================================

mod tier3_generation {
    use super::*;

    #[test]
    fn all_points_bounds() {
        let mesh = mesh();
        for value in 1..=3 {
            let r = res(value);
            let grid = mesh.all_points(r);
            assert_eq!(grid.len(), r.point_count());
            for p in grid.iter() {
                assert!(p.row <= 9 * value as usize);
                assert!(p.col < 15 * value as usize);
            }
        }
    }

    #[test]
    fn all_points_lie_on_sphere() {
        for config in [GridConfig::default(), GridConfig::quaternion()] {
            let mesh = IcosahedronMesh::new(config).unwrap();
            for p in mesh.all_points(res(2)).iter() {
                assert_relative_eq!(p.point.magnitude(), 250.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn every_point_is_inside_a_face() {
        let mesh = mesh();
        for p in mesh.all_points(res(2)).iter() {
            assert!(mesh.containing_triangle(p.position()).is_ok(), "{}", p.hash());
        }
    }

    #[test]
    fn lazy_window_is_small() {
        let mesh = mesh();
        let config = mesh.config().clone();
        let target = from_coordinates(12.0, 34.0, 250.0).unwrap().position;
        let t = mesh.containing_triangle(&target).unwrap();
        let window = generate_points_lazy(t, &target.coords, res(50), &config).unwrap();
        assert!(window.rows.len() <= 5);
        assert!(window.len() <= 25);
        assert!(!window.is_empty());
    }

    #[test]
    fn lazy_points_use_global_addresses() {
        let mesh = mesh();
        let r = res(2);
        let grid = mesh.all_points(r);
        let target = from_coordinates(-40.0, 120.0, 250.0).unwrap().position;
        for p in mesh.points_around_lazy(&target, r).unwrap() {
            let expected = grid.get(p.row, p.col).unwrap();
            assert_relative_eq!(p.position(), expected.position(), epsilon = 1e-6);
        }
    }
}

// =============================================================================
// TIER 4: Hashing
// =============================================================================

mod tier4_hashing {
    use super::*;

    #[test]
    fn north_pole_scenario() {
        let mesh = mesh();
        let hash = mesh
            .generate_hash(&Point3::new(0.0, 0.0, 250.0), res(1))
            .unwrap();
        assert_eq!(hash, "1|0|0");

        let (_, p) = mesh.parse_hash("1|0|0").unwrap();
        assert_relative_eq!(p.position(), &Point3::new(0.0, 0.0, 250.0), epsilon = 1e-9);
        assert!(p.is_vertex_center());
    }

    #[test]
    fn row_out_of_range_scenario() {
        let err = mesh().parse_hash("1|999|0").unwrap_err();
        assert!(err.is_hash_format());
        assert_eq!(
            err.hash_reason(),
            Some(&HashFormatError::RowOutOfRange { row: 999, max: 9 })
        );
        let message = err.to_string();
        assert!(message.contains("999"));
        assert!(message.contains('9'));
    }

    #[test]
    fn malformed_hashes() {
        let mesh = mesh();
        for hash in ["", "1", "1|2", "1|2|3|4", "a|b|c|d|e|f", "x|g|1|0|0", "e|x|1|0|0"] {
            let err = mesh.parse_hash(hash).unwrap_err();
            assert!(err.is_hash_format(), "{hash}: {err}");
        }
        assert!(matches!(
            mesh.parse_hash("d|g|1|0|0"),
            Err(GridError::UnsupportedOrientation { .. })
        ));
    }

    #[test]
    fn five_field_default_keys() {
        let (_, long) = mesh().parse_hash("e|g|2|5|7").unwrap();
        let (_, short) = mesh().parse_hash("2|5|7").unwrap();
        assert_eq!(long, short);
    }

    #[test]
    fn quaternion_mesh_uses_long_hashes() {
        let mesh = IcosahedronMesh::new(GridConfig::quaternion()).unwrap();
        let (_, p) = mesh.parse_hash("e|q|1|4|2").unwrap();
        let key = HashKey::for_point(&p, Orientation::Ecef, Projection::Quaternion);
        assert_eq!(key.to_string(), "e|q|1|4|2");
        assert!(matches!(
            mesh.generate_hash(p.position(), res(1)),
            Err(GridError::ProjectionNotReady { .. })
        ));
    }

    #[test]
    fn cities_round_trip() {
        let mesh = mesh();
        let cities = [
            (51.5074, -0.1278),
            (-33.8688, 151.2093),
            (40.7128, -74.0060),
            (35.6762, 139.6503),
            (-22.9068, -43.1729),
            (64.1466, -21.9426),
        ];
        for r in [1, 4, 16, 64] {
            for (lat, lon) in cities {
                let hash = mesh.hash_coordinates(lat, lon, res(r)).unwrap();
                let (_, center) = mesh.parse_hash(&hash).unwrap();
                assert_eq!(center.hash(), hash);
                assert!(center.is_vertex_center());
            }
        }
    }
}

// =============================================================================
// TIER 5: Phex cells
// =============================================================================

mod tier5_phex {
    use super::*;

    #[test]
    fn pentagon_count() {
        let mesh = mesh();
        for value in 1..=3 {
            let grid = mesh.all_points(res(value));
            let centers = generate_phex_centers(&grid);
            assert_eq!(centers.iter().filter(|c| c.is_vertex_center()).count(), 12);

            let phexes = generate_all_phexes(&grid).unwrap();
            assert_eq!(phexes.len(), centers.len());
            for phex in &phexes {
                let expected = if phex.center.is_vertex_center() { 5 } else { 6 };
                assert_eq!(phex.perimeter.len(), expected, "{}", phex.hash());
            }
        }
    }

    #[test]
    fn pole_ring_is_first_row() {
        let grid = mesh().all_points(res(2));
        let north = grid.get(0, 0).unwrap();
        let ring = surrounding_points(north, &grid).unwrap();
        assert_eq!(ring.len(), 5);
        assert!(ring.iter().all(|p| p.row == 1));
    }

    #[test]
    fn containing_phex_matches_hash() {
        let mesh = mesh();
        let r = res(2);
        let target = from_coordinates(48.8566, 2.3522, 250.0).unwrap().position;
        let phex = mesh.get_containing_phex(&target, r).unwrap();
        assert_eq!(phex.hash(), mesh.generate_hash(&target, r).unwrap());
        assert!(phex.perimeter.len() >= 5);
    }
}
