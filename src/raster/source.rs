//! Raster sources
//!
//! The extraction engine reads rasters through the `RasterSource` trait:
//! an affine transform, a declared no-data value, an optional coordinate
//! system and a set of same-shaped bands addressed by 1-based index.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::coordinate::{BoundingBox, CoordinateSystem, GeoTransform, Point};
use crate::errors::{ProbeError, ProbeResult};
use crate::extractor::PixelIndexer;

use super::grid::Grid;

/// Read-only view of a georeferenced raster
pub trait RasterSource: Send + Sync {
    /// Affine pixel transform shared by all bands
    fn transform(&self) -> &GeoTransform;

    /// Declared no-data sentinel
    fn nodata(&self) -> f64;

    /// Coordinate system of the transform, if known
    fn crs(&self) -> Option<CoordinateSystem>;

    /// Number of bands (or time slices)
    fn band_count(&self) -> usize;

    /// Band by 1-based index
    fn band(&self, band_index: usize) -> ProbeResult<&Grid>;

    /// (rows, cols) shared by every band
    fn dimensions(&self) -> (usize, usize);

    /// Acquisition date of a band, for sources that are time series
    fn band_date(&self, _band_index: usize) -> Option<NaiveDate> {
        None
    }

    /// Map-space extent of the raster
    fn bounds(&self) -> BoundingBox {
        let (rows, cols) = self.dimensions();
        self.transform().bounds(rows, cols)
    }

    /// Whether `point` indexes a pixel of the grid.
    ///
    /// Decided in pixel space, so edge handling matches extraction: on a
    /// north-up raster the top edge is row 0 and the bottom edge is one past
    /// the last row.
    fn contains_point(&self, point: &Point) -> bool {
        let (rows, cols) = self.dimensions();
        match PixelIndexer::new(self.transform()) {
            Ok(indexer) => {
                let pixel = indexer.index_point(point);
                (0..rows as i64).contains(&pixel.row) && (0..cols as i64).contains(&pixel.col)
            }
            Err(_) => false,
        }
    }
}

impl<R: RasterSource + ?Sized> RasterSource for Arc<R> {
    fn transform(&self) -> &GeoTransform {
        (**self).transform()
    }

    fn nodata(&self) -> f64 {
        (**self).nodata()
    }

    fn crs(&self) -> Option<CoordinateSystem> {
        (**self).crs()
    }

    fn band_count(&self) -> usize {
        (**self).band_count()
    }

    fn band(&self, band_index: usize) -> ProbeResult<&Grid> {
        (**self).band(band_index)
    }

    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn band_date(&self, band_index: usize) -> Option<NaiveDate> {
        (**self).band_date(band_index)
    }
}

/// Whether `value` is the no-data sentinel. A NaN sentinel matches NaN cells.
pub fn is_nodata(value: f64, nodata: f64) -> bool {
    value == nodata || (nodata.is_nan() && value.is_nan())
}

pub(crate) fn check_band_index(band_index: usize, band_count: usize) -> ProbeResult<usize> {
    if band_index == 0 || band_index > band_count {
        return Err(ProbeError::MissingBand { index: band_index, band_count });
    }
    Ok(band_index - 1)
}

pub(crate) fn check_same_shape<'a>(grids: impl IntoIterator<Item = &'a Grid>) -> ProbeResult<(usize, usize)> {
    let mut shape = None;
    for (i, grid) in grids.into_iter().enumerate() {
        match shape {
            None => shape = Some(grid.dimensions()),
            Some(expected) if expected != grid.dimensions() => {
                return Err(ProbeError::ShapeMismatch(format!(
                    "layer {} is {:?}, expected {:?}", i + 1, grid.dimensions(), expected
                )));
            }
            Some(_) => {}
        }
    }
    shape.ok_or_else(|| ProbeError::ShapeMismatch("raster has no bands".to_string()))
}

/// In-memory raster with one or more spectral bands
#[derive(Debug, Clone)]
pub struct MultiBandRaster {
    transform: GeoTransform,
    nodata: f64,
    crs: Option<CoordinateSystem>,
    bands: Vec<Grid>,
    shape: (usize, usize),
}

impl MultiBandRaster {
    /// Create a raster from its bands.
    ///
    /// The no-data value is required; every band must share one shape.
    pub fn new(transform: GeoTransform, nodata: f64, bands: Vec<Grid>) -> ProbeResult<Self> {
        let shape = check_same_shape(&bands)?;
        transform.invert()?;

        Ok(MultiBandRaster {
            transform,
            nodata,
            crs: None,
            bands,
            shape,
        })
    }

    /// Attach a coordinate system
    pub fn with_crs(mut self, crs: CoordinateSystem) -> Self {
        self.crs = Some(crs);
        self
    }

    /// All bands, in index order
    pub fn bands(&self) -> &[Grid] {
        &self.bands
    }
}

impl RasterSource for MultiBandRaster {
    fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    fn nodata(&self) -> f64 {
        self.nodata
    }

    fn crs(&self) -> Option<CoordinateSystem> {
        self.crs
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn band(&self, band_index: usize) -> ProbeResult<&Grid> {
        let i = check_band_index(band_index, self.bands.len())?;
        Ok(&self.bands[i])
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape
    }
}
