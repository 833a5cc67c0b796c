//! Grid resolution and the row/col address space it defines.
//!
//! A resolution `r` splits every icosahedron edge into `nd = 3r` divisions.
//! The global grid then has `3nd + 1` rows counted from the north pole:
//!
//! | rows            | region     | points per row   |
//! |-----------------|------------|------------------|
//! | `0`             | north pole | 1                |
//! | `1..nd`         | top cap    | `5·row`          |
//! | `nd..=2nd`      | equator    | `5·nd`           |
//! | `2nd+1..3nd`    | bottom cap | `5·(3nd − row)`  |
//! | `3nd`           | south pole | 1                |
//!
//! In total the grid holds `10·nd² + 2` points.

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};
use crate::point::GridPoint;

/// Grid resolution, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Resolution(NonZeroU32);

impl Resolution {
    /// The coarsest grid.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// The finest grid whose point count and ordinals fit in `usize`.
    pub const MAX: Self = match NonZeroU32::new(max_value()) {
        Some(v) => Self(v),
        None => Self::MIN,
    };

    /// Create a resolution.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidResolution`] for `0` or a value above
    /// [`Resolution::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use grid_types::Resolution;
    ///
    /// let res = Resolution::new(2)?;
    /// assert_eq!(res.divisions(), 6);
    /// assert_eq!(res.row_count(), 19);
    /// assert!(Resolution::new(0).is_err());
    /// # Ok::<(), grid_types::TypesError>(())
    /// ```
    pub const fn new(value: u32) -> TypesResult<Self> {
        match NonZeroU32::new(value) {
            Some(v) if value <= max_value() => Ok(Self(v)),
            _ => Err(TypesError::InvalidResolution(value)),
        }
    }

    /// Raw resolution value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Divisions per icosahedron edge (`nd = 3 · resolution`).
    #[inline]
    #[must_use]
    pub const fn divisions(self) -> usize {
        3 * self.0.get() as usize
    }

    /// Number of global rows (`3nd + 1`).
    #[inline]
    #[must_use]
    pub const fn row_count(self) -> usize {
        3 * self.divisions() + 1
    }

    /// Largest valid row index (`3nd`).
    #[inline]
    #[must_use]
    pub const fn max_row(self) -> usize {
        3 * self.divisions()
    }

    /// Largest column index any row can hold (`5nd − 1`).
    #[inline]
    #[must_use]
    pub const fn max_col(self) -> usize {
        5 * self.divisions() - 1
    }

    /// Number of points in a global row, `0` past the south pole.
    #[must_use]
    pub const fn row_width(self, row: usize) -> usize {
        let nd = self.divisions();
        if row == 0 || row == 3 * nd {
            1
        } else if row < nd {
            5 * row
        } else if row <= 2 * nd {
            5 * nd
        } else if row < 3 * nd {
            5 * (3 * nd - row)
        } else {
            0
        }
    }

    /// Total number of points in the grid (`10nd² + 2`).
    #[inline]
    #[must_use]
    pub const fn point_count(self) -> usize {
        let nd = self.divisions();
        10 * nd * nd + 2
    }

    /// True when `(row, col)` names a point on this grid.
    #[inline]
    #[must_use]
    pub const fn contains(self, row: usize, col: usize) -> bool {
        col < self.row_width(row)
    }

    /// Number of points in all rows before `row`.
    const fn points_before(self, row: usize) -> usize {
        let nd = self.divisions();
        if row == 0 {
            0
        } else if row <= nd {
            1 + 5 * (row - 1) * row / 2
        } else if row <= 2 * nd + 1 {
            self.points_before(nd) + (row - nd) * 5 * nd
        } else {
            let n = row - 2 * nd - 1;
            self.points_before(2 * nd + 1) + 5 * (n * nd - n * (n + 1) / 2)
        }
    }
}

/// Largest `r` with `10·(3r)² + 2 <= usize::MAX`.
#[allow(clippy::cast_possible_truncation)]
const fn max_value() -> u32 {
    let r = ((usize::MAX - 2) / 90).isqrt();
    if r > u32::MAX as usize { u32::MAX } else { r as u32 }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Resolution {
    type Error = TypesError;

    fn try_from(value: u32) -> TypesResult<Self> {
        Self::new(value)
    }
}

impl From<Resolution> for u32 {
    fn from(res: Resolution) -> Self {
        res.get()
    }
}

/// True when `(row, col)` is a phex center at `resolution`.
///
/// Poles are always centers. Elsewhere centers fall on every third point,
/// with the phase measured from the nearest triangle edge in the caps and
/// from the row index along the equatorial band.
///
/// # Example
///
/// ```
/// use grid_types::{Resolution, is_phex_center};
///
/// let res = Resolution::new(1)?;
/// assert!(is_phex_center(0, 0, res));
/// assert!(is_phex_center(3, 0, res));
/// assert!(!is_phex_center(3, 1, res));
/// # Ok::<(), grid_types::TypesError>(())
/// ```
#[must_use]
pub const fn is_phex_center(row: usize, col: usize, resolution: Resolution) -> bool {
    let nd = resolution.divisions();
    if row == 0 || row == 3 * nd {
        return true;
    }
    if row > 2 * nd {
        let from_bottom = row - 2 * nd;
        let local = col % (nd - from_bottom);
        return local % 3 == from_bottom % 3;
    }
    if row >= nd {
        return col % 3 == row % 3;
    }
    (col % row + row) % 3 == 0
}

/// Zero-based ordinal of a grid point in row-major order.
///
/// Ordinals are consecutive from the north pole (`0`) to the south pole
/// (`10nd² + 1`) and depend only on resolution, row and column.
///
/// # Example
///
/// ```
/// use grid_types::{GridPoint, Point, Resolution, point_num};
///
/// let res = Resolution::new(1)?;
/// let first_equator = GridPoint::new(Point::from_coords(0.0, 0.0, 0.0), res, 3, 0);
/// assert_eq!(point_num(&first_equator), 1 + 5 + 10);
/// # Ok::<(), grid_types::TypesError>(())
/// ```
#[must_use]
pub const fn point_num(point: &GridPoint) -> usize {
    point.resolution.points_before(point.row) + point.col
}
