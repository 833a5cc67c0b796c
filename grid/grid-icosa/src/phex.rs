//! Hexagon/pentagon ("phex") cells derived from the point grid.
//!
//! Every third grid point is a phex center; the ring of grid points around
//! it is the cell perimeter. The 12 icosahedron vertices (poles included)
//! have five neighbors and form pentagons. Every other cell is a hexagon.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use grid_types::{GridPoint, Resolution};
use nalgebra::Point3;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::grid::PointGrid;
use crate::icosahedron::IcosahedronMesh;

/// A cell: center point and the ring of points around it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phex {
    /// Cell center.
    pub center: GridPoint,
    /// Neighboring grid points around the center.
    pub perimeter: Vec<GridPoint>,
}

impl Phex {
    /// Whether the cell has five sides.
    #[must_use]
    pub fn is_pentagon(&self) -> bool {
        self.perimeter.len() == 5
    }

    /// Hash of the center in 3-field form.
    #[must_use]
    pub fn hash(&self) -> String {
        self.center.hash()
    }
}

const fn round_up(value: usize, multiple: usize) -> usize {
    value.div_ceil(multiple) * multiple
}

/// The phex centers of a grid, row by row.
///
/// Cap rows restart a stride of 3 at every face edge, phased by the
/// distance to the nearest pole. Equatorial rows take every third point
/// starting at `row mod 3`. The result matches
/// [`is_phex_center`](grid_types::is_phex_center) point for point.
#[must_use]
pub fn generate_phex_centers(grid: &PointGrid) -> Vec<GridPoint> {
    let nd = grid.resolution().divisions();
    let mut centers = Vec::new();

    for (row, points) in grid.rows().iter().enumerate() {
        if nd <= row && row <= 2 * nd {
            centers.extend(points.iter().skip(row % 3).step_by(3));
            continue;
        }

        let (first, edge_width) = if row < nd {
            (round_up(row, 3) - row, row)
        } else {
            (row % 3, round_up(row, nd) - row)
        };
        let mut count = 0;
        for (col, point) in points.iter().enumerate() {
            if edge_width != 0 && col % edge_width == 0 {
                count = first;
            }
            if count == 0 {
                centers.push(*point);
                count = 3;
            }
            count -= 1;
        }
    }
    centers
}

/// Addresses of the grid points around `(row, col)`.
///
/// Poles return the whole adjacent row. Icosahedron vertices return five
/// addresses and every other point returns six. Columns wrap around the
/// row.
///
/// # Errors
///
/// Returns [`GridError::AddressOutOfGrid`] when the address does not exist.
///
/// # Example
///
/// ```
/// use grid_icosa::surrounding_addresses;
/// use grid_types::Resolution;
///
/// let res = Resolution::new(1)?;
/// assert_eq!(surrounding_addresses(0, 0, res)?.len(), 5);
/// assert_eq!(surrounding_addresses(3, 0, res)?.len(), 5);
/// assert_eq!(surrounding_addresses(4, 1, res)?.len(), 6);
/// # Ok::<(), grid_icosa::GridError>(())
/// ```
pub fn surrounding_addresses(
    row: usize,
    col: usize,
    resolution: Resolution,
) -> GridResult<Vec<(usize, usize)>> {
    if !resolution.contains(row, col) {
        return Err(GridError::AddressOutOfGrid {
            row,
            col,
            resolution: resolution.get(),
        });
    }

    let nd = resolution.divisions();
    if row == 0 {
        return Ok((0..resolution.row_width(1)).map(|c| (1, c)).collect());
    }
    if row == 3 * nd {
        let above = row - 1;
        return Ok((0..resolution.row_width(above)).map(|c| (above, c)).collect());
    }

    let width = |r: i64| resolution.row_width(r as usize) as i64;
    let at = |r: i64, c: i64| (r as usize, c.rem_euclid(width(r)) as usize);
    let is_vertex = (row == nd || row == 2 * nd) && col % nd == 0;

    let (r, c, n) = (row as i64, col as i64, nd as i64);
    let left = at(r, c - 1);
    let right = at(r, c + 1);

    let ring = if row < nd {
        let off = c / r;
        if c % r == 0 {
            vec![
                at(r + 1, c + off - 1),
                left,
                at(r - 1, c - off),
                right,
                at(r + 1, c + off + 1),
                at(r + 1, c + off),
            ]
        } else {
            vec![
                left,
                at(r - 1, c - 1 - off),
                at(r - 1, c - off),
                right,
                at(r + 1, c + off + 1),
                at(r + 1, c + off),
            ]
        }
    } else if row == nd {
        let off = c * width(r - 1) / width(r) / (r - 1).max(1);
        let above_right = at(r - 1, c - off);
        if is_vertex {
            vec![left, above_right, right, at(r + 1, c), at(r + 1, c - 1)]
        } else {
            vec![
                left,
                at(r - 1, c - 1 - off),
                above_right,
                right,
                at(r + 1, c),
                at(r + 1, c - 1),
            ]
        }
    } else if row < 2 * nd {
        vec![
            left,
            at(r - 1, c),
            at(r - 1, c + 1),
            right,
            at(r + 1, c),
            at(r + 1, c - 1),
        ]
    } else if row == 2 * nd {
        let off = c * width(r + 1) / width(r) / (n - 1).max(1);
        let mut ring = vec![left, at(r - 1, c), at(r - 1, c + 1), right, at(r + 1, c - off)];
        if !is_vertex {
            ring.push(at(r + 1, c - 1 - off));
        }
        ring
    } else {
        let cap_width = 3 * n - r;
        let off = c / cap_width;
        if c % cap_width == 0 {
            vec![
                at(r - 1, c + off - 1),
                at(r - 1, c + off),
                at(r - 1, c + off + 1),
                right,
                at(r + 1, c - off),
                left,
            ]
        } else {
            vec![
                left,
                at(r - 1, c + off),
                at(r - 1, c + off + 1),
                right,
                at(r + 1, c - off),
                at(r + 1, c - 1 - off),
            ]
        }
    };
    Ok(ring)
}

/// The ring of grid points around `center`, looked up in `grid`.
///
/// # Errors
///
/// Returns [`GridError::ResolutionMismatch`] when `center` belongs to a
/// different resolution and [`GridError::AddressOutOfGrid`] when its
/// address does not exist.
pub fn surrounding_points(center: &GridPoint, grid: &PointGrid) -> GridResult<Vec<GridPoint>> {
    let resolution = grid.resolution();
    if center.resolution != resolution {
        return Err(GridError::ResolutionMismatch {
            expected: resolution.get(),
            found: center.resolution.get(),
        });
    }
    surrounding_addresses(center.row, center.col, resolution)?
        .into_iter()
        .map(|(row, col)| {
            grid.get(row, col).copied().ok_or(GridError::AddressOutOfGrid {
                row,
                col,
                resolution: resolution.get(),
            })
        })
        .collect()
}

/// Every phex of a grid.
///
/// # Errors
///
/// Propagates lookup errors from [`surrounding_points`]; none occur for a
/// grid produced by [`IcosahedronMesh::all_points`].
pub fn generate_all_phexes(grid: &PointGrid) -> GridResult<Vec<Phex>> {
    generate_phex_centers(grid)
        .into_iter()
        .map(|center| {
            Ok(Phex {
                perimeter: surrounding_points(&center, grid)?,
                center,
            })
        })
        .collect()
}

impl IcosahedronMesh {
    /// The phex whose center is nearest to `point`, by brute force.
    ///
    /// Generates the whole grid and every phex, then scans the centers.
    /// This is a correctness baseline; [`generate_hash`](Self::generate_hash)
    /// finds the same center from a small window.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`generate_all_phexes`].
    pub fn get_containing_phex(&self, point: &Point3<f64>, resolution: Resolution) -> GridResult<Phex> {
        let grid = self.all_points(resolution);
        let phexes = generate_all_phexes(&grid)?;
        debug!(
            "Scanning {} phexes at resolution {} for nearest center",
            phexes.len(),
            resolution
        );

        phexes
            .into_iter()
            .map(|phex| (nalgebra::distance_squared(phex.center.position(), point), phex))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, phex)| phex)
            .ok_or_else(|| GridError::no_containing_triangle(point))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use grid_types::is_phex_center;

    fn mesh() -> IcosahedronMesh {
        IcosahedronMesh::new(GridConfig::default()).unwrap()
    }

    fn res(value: u32) -> Resolution {
        Resolution::new(value).unwrap()
    }

    #[test]
    fn test_centers_match_parity_rule() {
        let mesh = mesh();
        for value in 1..=4 {
            let r = res(value);
            let grid = mesh.all_points(r);
            let centers = generate_phex_centers(&grid);
            let expected: Vec<(usize, usize)> = grid
                .iter()
                .filter(|p| is_phex_center(p.row, p.col, r))
                .map(|p| (p.row, p.col))
                .collect();
            let found: Vec<(usize, usize)> = centers.iter().map(|p| (p.row, p.col)).collect();
            assert_eq!(found, expected, "resolution {value}");
            let nd = r.divisions();
            assert_eq!(centers.len(), 10 * nd * nd / 3 + 2);
        }
    }

    #[test]
    fn test_twelve_pentagons() {
        let mesh = mesh();
        for value in 1..=4 {
            let grid = mesh.all_points(res(value));
            let phexes = generate_all_phexes(&grid).unwrap();
            let pentagons: Vec<&Phex> = phexes.iter().filter(|p| p.is_pentagon()).collect();
            assert_eq!(pentagons.len(), 12, "resolution {value}");
            for p in &pentagons {
                assert!(p.center.is_vertex_center(), "{}", p.hash());
            }
            for p in phexes.iter().filter(|p| !p.is_pentagon()) {
                assert_eq!(p.perimeter.len(), 6, "{}", p.hash());
                assert!(!p.center.is_vertex_center());
            }
        }
    }

    #[test]
    fn test_perimeter_is_nearest_ring() {
        let mesh = mesh();
        let grid = mesh.all_points(res(2));
        let all = grid.flatten();
        for phex in generate_all_phexes(&grid).unwrap() {
            let n = phex.perimeter.len();
            let mut nearest: Vec<(f64, (usize, usize))> = all
                .iter()
                .filter(|p| (p.row, p.col) != (phex.center.row, phex.center.col))
                .map(|p| (p.point.distance(&phex.center.point), (p.row, p.col)))
                .collect();
            nearest.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut expected: Vec<(usize, usize)> = nearest[..n].iter().map(|x| x.1).collect();
            let mut found: Vec<(usize, usize)> =
                phex.perimeter.iter().map(|p| (p.row, p.col)).collect();
            expected.sort_unstable();
            found.sort_unstable();
            assert_eq!(found, expected, "{}", phex.hash());
        }
    }

    #[test]
    fn test_surrounding_rejects_bad_input() {
        let r = res(1);
        assert!(surrounding_addresses(10, 0, r).unwrap_err().is_input_range());
        assert!(surrounding_addresses(1, 5, r).is_err());

        let grid = mesh().all_points(r);
        let other = mesh().all_points(res(2));
        let center = *other.get(0, 0).unwrap();
        assert!(matches!(
            surrounding_points(&center, &grid),
            Err(GridError::ResolutionMismatch { .. })
        ));
    }

    #[test]
    fn test_containing_phex_agrees_with_hash() {
        let mesh = mesh();
        let r = res(2);
        let grid = mesh.all_points(r);
        for p in generate_phex_centers(&grid).iter().step_by(5) {
            let target = p.position() * 1.01;
            let phex = mesh.get_containing_phex(&target, r).unwrap();
            assert_eq!(phex.hash(), mesh.generate_hash(&target, r).unwrap());
        }
    }
}
