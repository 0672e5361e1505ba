//! Square-window aggregation around a pixel
//!
//! A window of half-size `h` around pixel (row, col) covers rows
//! `row-h ..= row+h` and columns `col-h ..= col+h`. A half-size of zero is a
//! point sample and returns the cell value unchanged.

use log::trace;

use crate::coordinate::PixelCoordinate;
use crate::errors::{ProbeError, ProbeResult};
use crate::raster::{is_nodata, Grid};

use super::statistic::Statistic;

/// How no-data cells inside a window are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Every cell counts, no-data sentinels included
    #[default]
    IncludeNoData,
    /// No-data (and NaN) cells are left out of the aggregate
    ExcludeNoData,
}

impl AggregationMode {
    /// Mode for the legacy `masked` flag
    pub fn from_masked(masked: bool) -> Self {
        if masked {
            AggregationMode::ExcludeNoData
        } else {
            AggregationMode::IncludeNoData
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, AggregationMode::ExcludeNoData)
    }
}

/// Convert a buffer diameter in map units to a half-window in pixels:
/// `floor((buffer_size / pixel_size) / 2)`.
pub fn half_window(buffer_size: f64, pixel_size: f64) -> ProbeResult<usize> {
    if buffer_size.is_nan() || buffer_size < 0.0 {
        return Err(ProbeError::NegativeBufferSize(buffer_size));
    }
    if buffer_size.is_infinite() {
        return Err(ProbeError::Configuration("buffer size must be finite".to_string()));
    }
    if !(pixel_size > 0.0) || !pixel_size.is_finite() {
        return Err(ProbeError::Configuration(format!(
            "pixel size must be positive and finite, got {}", pixel_size
        )));
    }

    Ok(((buffer_size / pixel_size) / 2.0).floor() as usize)
}

/// A window that does not fit inside its grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub pixel: PixelCoordinate,
    pub half_window: usize,
    pub rows: usize,
    pub cols: usize,
}

impl OutOfBounds {
    /// Attach the point and band that were being sampled
    pub fn into_error(self, point_id: usize, band: &str) -> ProbeError {
        ProbeError::IndexOutOfBounds {
            point_id,
            band: band.to_string(),
            row: self.pixel.row,
            col: self.pixel.col,
            half_window: self.half_window,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// Aggregates the square window around a pixel
#[derive(Debug, Clone, Copy)]
pub struct WindowAggregator {
    half_window: usize,
    mode: AggregationMode,
    nodata: f64,
    statistic: Statistic,
}

impl WindowAggregator {
    /// Create an aggregator.
    ///
    /// Excluding no-data is only meaningful over a window; combining it with
    /// a point sample (`half_window == 0`) is rejected.
    pub fn new(half_window: usize, mode: AggregationMode, nodata: f64, statistic: Statistic) -> ProbeResult<Self> {
        if half_window == 0 && mode.is_masked() {
            return Err(ProbeError::MaskedPointSample);
        }

        Ok(WindowAggregator {
            half_window,
            mode,
            nodata,
            statistic,
        })
    }

    pub fn half_window(&self) -> usize {
        self.half_window
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Row and column ranges of the window, if it lies fully inside `grid`.
    ///
    /// A half-window too large for `i64` can never fit and yields None.
    fn window_ranges(&self, grid: &Grid, pixel: PixelCoordinate) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let h = i64::try_from(self.half_window).ok()?;
        let row_start = pixel.row.checked_sub(h)?;
        let row_end = pixel.row.checked_add(h)?.checked_add(1)?;
        let col_start = pixel.col.checked_sub(h)?;
        let col_end = pixel.col.checked_add(h)?.checked_add(1)?;

        if row_start < 0 || col_start < 0 || row_end > grid.rows() as i64 || col_end > grid.cols() as i64 {
            return None;
        }

        Some((row_start as usize..row_end as usize, col_start as usize..col_end as usize))
    }

    /// Aggregate the window centred on `pixel`.
    ///
    /// Windows running off the grid edge are an error, never clipped. In
    /// `ExcludeNoData` mode a window with no valid cells yields NaN.
    pub fn aggregate(&self, grid: &Grid, pixel: PixelCoordinate) -> Result<f64, OutOfBounds> {
        let (rows, cols) = self.window_ranges(grid, pixel).ok_or(OutOfBounds {
            pixel,
            half_window: self.half_window,
            rows: grid.rows(),
            cols: grid.cols(),
        })?;

        if self.half_window == 0 {
            // Point sample: the single cell of the window
            return Ok(grid.window(rows, cols).next().unwrap_or(f64::NAN));
        }

        let value = match self.mode {
            AggregationMode::IncludeNoData => self.statistic.apply(grid.window(rows, cols)),
            AggregationMode::ExcludeNoData => {
                let nodata = self.nodata;
                self.statistic.apply(
                    grid.window(rows, cols).filter(|v| !v.is_nan() && !is_nodata(*v, nodata))
                )
            }
        };

        trace!("Window at ({}, {}) h={} -> {}", pixel.row, pixel.col, self.half_window, value);
        Ok(value)
    }
}
