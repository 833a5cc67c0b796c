//! Conversion between face-local and global grid addresses.
//!
//! Local addresses use the window layout of
//! [`generate_points_lazy`](crate::generate_points_lazy): on down faces the
//! local column counts away from the CA edge. Global rows run from the north
//! pole; global columns run eastward around the row and wrap at the seam
//! between faces 4 and 0.

use grid_types::Resolution;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::triangle::{Pointing, Region, Triangle};

/// A point addressed within one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalAddress {
    /// Face id.
    pub triangle: usize,
    /// Local row.
    pub row: usize,
    /// Local column.
    pub col: usize,
}

/// Global `(row, col)` of local `(row, col)` on `triangle`.
///
/// # Example
///
/// ```
/// use grid_icosa::{GridConfig, IcosahedronMesh, global_address};
/// use grid_types::Resolution;
///
/// let mesh = IcosahedronMesh::new(GridConfig::default())?;
/// let res = Resolution::new(1)?;
/// // second face of the top cap, one row below the pole
/// assert_eq!(global_address(&mesh.triangles()[1], 1, 0, res), (1, 1));
/// // the last column of a row wraps back to the seam
/// assert_eq!(global_address(&mesh.triangles()[4], 1, 1, res), (1, 0));
/// # Ok::<(), grid_icosa::GridError>(())
/// ```
#[must_use]
pub fn global_address(
    triangle: &Triangle,
    local_row: usize,
    local_col: usize,
    resolution: Resolution,
) -> (usize, usize) {
    let nd = resolution.divisions();
    let id = triangle.id;
    let (row, col) = match (triangle.region, triangle.pointing) {
        (Region::TopCap, _) => (local_row, local_row * id + local_col),
        (Region::Equator, pointing) => {
            let before = nd * ((id - 5) / 2);
            let col = match pointing {
                Pointing::Up => before + (nd - local_row) + local_col,
                Pointing::Down => before + (nd - local_row - local_col),
            };
            (nd + local_row, col)
        }
        (Region::BottomCap, _) => (
            2 * nd + local_row,
            (nd - local_row) * (id - 14) - local_col,
        ),
    };
    if col == resolution.row_width(row) {
        (row, 0)
    } else {
        (row, col)
    }
}

/// Face and local address owning global `(row, col)`.
///
/// Points on shared edges resolve to a single owning face. The address must
/// exist at `resolution`.
///
/// # Example
///
/// ```
/// use grid_icosa::local_address;
/// use grid_types::Resolution;
///
/// let res = Resolution::new(1)?;
/// let south = local_address(9, 0, res);
/// assert_eq!((south.triangle, south.row, south.col), (15, 3, 0));
/// # Ok::<(), grid_types::TypesError>(())
/// ```
#[must_use]
pub fn local_address(row: usize, col: usize, resolution: Resolution) -> LocalAddress {
    let nd = resolution.divisions();
    if row < nd {
        let triangle = if row == 0 { 0 } else { col / row };
        LocalAddress {
            triangle,
            row,
            col: col - triangle * row,
        }
    } else if row <= 2 * nd {
        let local_row = row - nd;
        let pair = col / nd;
        let offset = pair * nd + (nd - local_row);
        if col > offset {
            LocalAddress {
                triangle: 6 + 2 * pair,
                row: local_row,
                col: col - offset,
            }
        } else {
            LocalAddress {
                triangle: 5 + 2 * pair,
                row: local_row,
                col: offset - col,
            }
        }
    } else {
        let local_row = row - 2 * nd;
        let width = nd - local_row;
        let face = if width == 0 { 0 } else { col / width };
        LocalAddress {
            triangle: 15 + face,
            row: local_row,
            col: width - (col - face * width),
        }
    }
}
