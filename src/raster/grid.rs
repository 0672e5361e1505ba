//! Two-dimensional band storage
//!
//! A `Grid` holds one band (or one time slice) of numeric values in
//! row-major order. Grids are immutable once built.

use std::ops::Range;

use crate::errors::{ProbeError, ProbeResult};

/// Row-major 2D array of cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Create a grid from row-major data
    ///
    /// # Arguments
    /// * `rows` - Number of rows (height)
    /// * `cols` - Number of columns (width)
    /// * `data` - Cell values, `rows * cols` of them
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> ProbeResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ProbeError::ShapeMismatch(format!(
                "grid dimensions must be positive, got {}x{}", rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(ProbeError::ShapeMismatch(format!(
                "{}x{} grid needs {} values, got {}", rows, cols, rows * cols, data.len()
            )));
        }

        Ok(Grid { rows, cols, data })
    }

    /// Create a grid from nested rows, all of equal length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ProbeResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ProbeError::ShapeMismatch(format!(
                "row {} has {} values, expected {}", i, row.len(), width
            )));
        }

        Grid::new(height, width, rows.into_iter().flatten().collect())
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> ProbeResult<Self> {
        Grid::new(rows, cols, vec![value; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at (row, col), or None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Row-major cell values
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over the values of a rectangular sub-window.
    ///
    /// The ranges must lie inside the grid; callers check bounds first.
    pub fn window(&self, rows: Range<usize>, cols: Range<usize>) -> impl Iterator<Item = f64> + '_ {
        debug_assert!(rows.end <= self.rows && cols.end <= self.cols);
        let width = self.cols;
        rows.flat_map(move |r| {
            let start = r * width;
            self.data[start + cols.start..start + cols.end].iter().copied()
        })
    }
}
