//! Extraction across all bands or time slices of a raster
//!
//! A session validates its parameters once, indexes every point once, and
//! then samples each band (or each dated slice) of a raster, adding one
//! column per layer to the result table. A failure anywhere aborts the whole
//! call; no partially filled table is returned.

use log::{debug, info};

use crate::coordinate::PixelCoordinate;
use crate::errors::{ProbeError, ProbeResult};
use crate::raster::{Grid, RasterSource};
use crate::table::AttributeTable;
use crate::vector::PointSet;

use super::pixel_indexer::PixelIndexer;
use super::statistic::Statistic;
use super::window::{half_window, AggregationMode, WindowAggregator};

/// Parameters of a point extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionParams {
    /// Diameter of the sampling neighbourhood, in map units
    pub buffer_size: f64,
    /// Treatment of no-data cells inside the window
    pub mode: AggregationMode,
    /// No-data value to mask; `None` uses the value the raster declares
    pub nodata: Option<f64>,
    /// Aggregate computed over the window
    pub statistic: Statistic,
}

impl ExtractionParams {
    pub fn new(buffer_size: f64, mode: AggregationMode) -> Self {
        ExtractionParams {
            buffer_size,
            mode,
            nodata: None,
            statistic: Statistic::Mean,
        }
    }

    /// Override the raster's declared no-data value
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }
}

/// How result columns are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// One column per band, `band_<n>_<date>`, with one date for the whole raster
    MultiBand { date: String },
    /// One column per time slice, named by the slice's ISO date
    MultiTemporal,
}

/// Runs point extraction for one parameter set
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    params: ExtractionParams,
}

impl ExtractionSession {
    /// Create a session, rejecting invalid parameters up front
    pub fn new(params: ExtractionParams) -> ProbeResult<Self> {
        if params.buffer_size.is_nan() || params.buffer_size < 0.0 {
            return Err(ProbeError::NegativeBufferSize(params.buffer_size));
        }
        // A zero buffer is a point sample at any pixel size. Sub-pixel buffers
        // are caught in `run` once the pixel size is known.
        if params.buffer_size == 0.0 && params.mode.is_masked() {
            return Err(ProbeError::MaskedPointSample);
        }

        Ok(ExtractionSession { params })
    }

    pub fn params(&self) -> &ExtractionParams {
        &self.params
    }

    /// Sample every band of `raster`; columns are named `band_<n>_<date>`
    pub fn run_bands<R: RasterSource + ?Sized>(&self, raster: &R, points: &PointSet, date: &str) -> ProbeResult<AttributeTable> {
        self.run(raster, points, &OutputMode::MultiBand { date: date.to_string() })
    }

    /// Sample every slice of a dated raster; columns are named by date
    pub fn run_temporal<R: RasterSource + ?Sized>(&self, raster: &R, points: &PointSet) -> ProbeResult<AttributeTable> {
        self.run(raster, points, &OutputMode::MultiTemporal)
    }

    /// Sample every layer of `raster` at `points`
    ///
    /// # Returns
    /// A table with one row per point, in input order, and one column per layer
    pub fn run<R: RasterSource + ?Sized>(&self, raster: &R, points: &PointSet, output: &OutputMode) -> ProbeResult<AttributeTable> {
        self.check_crs(raster, points)?;

        let pixel_size = raster.transform().pixel_size();
        let half = half_window(self.params.buffer_size, pixel_size)?;
        let nodata = self.params.nodata.unwrap_or_else(|| raster.nodata());
        let aggregator = WindowAggregator::new(half, self.params.mode, nodata, self.params.statistic)?;
        let labels = layer_labels(raster, output)?;

        info!(
            "Extracting {} of {} layer(s) at {} point(s): buffer {} -> half-window {} ({:?})",
            self.params.statistic, labels.len(), points.len(), self.params.buffer_size, half, self.params.mode
        );

        let pixels = PixelIndexer::new(raster.transform())?.index(points.points());

        let mut table = AttributeTable::new(points.ids().to_vec());
        for (band_index, label) in labels {
            let grid = raster.band(band_index)?;
            let values = sample_layer(grid, &label, points, &pixels, &aggregator)?;
            debug!("Layer {} -> column '{}'", band_index, label);
            table.add_column(label, values)?;
        }

        Ok(table)
    }

    fn check_crs<R: RasterSource + ?Sized>(&self, raster: &R, points: &PointSet) -> ProbeResult<()> {
        match (raster.crs(), points.crs()) {
            (Some(r), Some(p)) if r != p => Err(ProbeError::CrsMismatch {
                raster: r.epsg_code(),
                points: p.epsg_code(),
            }),
            _ => Ok(()),
        }
    }
}

/// Column names for every layer, resolved before any band is read
fn layer_labels<R: RasterSource + ?Sized>(raster: &R, output: &OutputMode) -> ProbeResult<Vec<(usize, String)>> {
    (1..=raster.band_count())
        .map(|band_index| {
            let label = match output {
                OutputMode::MultiBand { date } => format!("band_{}_{}", band_index, date),
                OutputMode::MultiTemporal => raster.band_date(band_index)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .ok_or_else(|| ProbeError::Configuration(format!(
                        "layer {} has no acquisition date; multi-temporal output needs a dated stack",
                        band_index
                    )))?,
            };
            Ok((band_index, label))
        })
        .collect()
}

fn sample_layer(
    grid: &Grid,
    label: &str,
    points: &PointSet,
    pixels: &[PixelCoordinate],
    aggregator: &WindowAggregator,
) -> ProbeResult<Vec<f64>> {
    points.ids().iter()
        .zip(pixels)
        .map(|(id, pixel)| {
            aggregator.aggregate(grid, *pixel).map_err(|oob| oob.into_error(*id, label))
        })
        .collect()
}
