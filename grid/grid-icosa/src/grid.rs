//! The fully materialized point grid.

use grid_types::{GridPoint, Resolution};

/// Every point of a grid, addressed by `[row][col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrid {
    resolution: Resolution,
    rows: Vec<Vec<GridPoint>>,
}

impl PointGrid {
    pub(crate) const fn new(resolution: Resolution, rows: Vec<Vec<GridPoint>>) -> Self {
        Self { resolution, rows }
    }

    /// Resolution the grid was generated at.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// All rows, north to south.
    #[must_use]
    pub fn rows(&self) -> &[Vec<GridPoint>] {
        &self.rows
    }

    /// One row, if it exists.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[GridPoint]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Point at `(row, col)`, if it exists.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&GridPoint> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Whether the grid holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Points in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &GridPoint> {
        self.rows.iter().flatten()
    }

    /// Points in row-major order, collected.
    #[must_use]
    pub fn flatten(&self) -> Vec<GridPoint> {
        self.iter().copied().collect()
    }
}
