//! Zonal aggregation over one raster band
//!
//! `ZonalAggregator` is the seam between the tile runner and whatever
//! computes per-geometry statistics. `RasterZonalAggregator` is the built-in
//! implementation: polygons take the cells whose centres fall inside them,
//! points take the cell containing them, and no-data cells are ignored.

use log::debug;

use crate::coordinate::GeoTransform;
use crate::errors::{ProbeError, ProbeResult};
use crate::extractor::PixelIndexer;
use crate::raster::{is_nodata, Grid, RasterOpener, RasterSource};
use crate::vector::{Geometries, Polygon};

use super::statistic::ZonalStatistic;

/// Computes one statistic per geometry for one band of one raster
pub trait ZonalAggregator: Send + Sync {
    /// # Returns
    /// One value per geometry, aligned with `geometries`
    fn compute(
        &self,
        geometries: &Geometries,
        raster_path: &str,
        band_index: usize,
        statistic: ZonalStatistic,
    ) -> ProbeResult<Vec<f64>>;
}

/// Zonal statistics over rasters resolved through a `RasterOpener`
pub struct RasterZonalAggregator<'a> {
    opener: &'a dyn RasterOpener,
}

impl<'a> RasterZonalAggregator<'a> {
    pub fn new(opener: &'a dyn RasterOpener) -> Self {
        RasterZonalAggregator { opener }
    }
}

impl<'a> ZonalAggregator for RasterZonalAggregator<'a> {
    fn compute(
        &self,
        geometries: &Geometries,
        raster_path: &str,
        band_index: usize,
        statistic: ZonalStatistic,
    ) -> ProbeResult<Vec<f64>> {
        let raster = self.opener.open(raster_path)?;

        if let (Some(r), Some(g)) = (raster.crs(), geometries.crs()) {
            if r != g {
                return Err(ProbeError::CrsMismatch { raster: r.epsg_code(), points: g.epsg_code() });
            }
        }

        let zones = zone_values(raster.as_ref(), band_index, geometries)?;
        debug!("{} of band {} over {} zone(s) of {}", statistic, band_index, zones.len(), raster_path);

        Ok(zones.iter().map(|values| statistic.compute(values)).collect())
    }
}

/// Valid cell values covered by each geometry, in geometry order
pub fn zone_values<R: RasterSource + ?Sized>(
    raster: &R,
    band_index: usize,
    geometries: &Geometries,
) -> ProbeResult<Vec<Vec<f64>>> {
    let grid = raster.band(band_index)?;
    let nodata = raster.nodata();
    let valid = |v: f64| !v.is_nan() && !is_nodata(v, nodata);

    match geometries {
        Geometries::Points(points) => {
            let indexer = PixelIndexer::new(raster.transform())?;
            Ok(points.points().iter()
                .map(|p| {
                    let pixel = indexer.index_point(p);
                    if pixel.row < 0 || pixel.col < 0 {
                        return Vec::new();
                    }
                    grid.get(pixel.row as usize, pixel.col as usize)
                        .filter(|v| valid(*v))
                        .into_iter()
                        .collect()
                })
                .collect())
        }
        Geometries::Polygons(polygons) => {
            let inverse = raster.transform().invert()?;
            Ok(polygons.polygons().iter()
                .map(|polygon| polygon_cells(polygon, grid, raster.transform(), &inverse)
                    .into_iter()
                    .filter(|v| valid(*v))
                    .collect())
                .collect())
        }
    }
}

/// Values of the cells whose centres lie inside `polygon`
fn polygon_cells(polygon: &Polygon, grid: &Grid, transform: &GeoTransform, inverse: &GeoTransform) -> Vec<f64> {
    let bbox = polygon.bbox();
    let corners = [
        inverse.apply(bbox.min_x, bbox.min_y),
        inverse.apply(bbox.max_x, bbox.min_y),
        inverse.apply(bbox.min_x, bbox.max_y),
        inverse.apply(bbox.max_x, bbox.max_y),
    ];

    // Candidate pixel window, clipped to the grid
    let col_min = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min).floor().max(0.0);
    let col_max = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max).ceil().min(grid.cols() as f64);
    let row_min = corners.iter().map(|c| c.y).fold(f64::INFINITY, f64::min).floor().max(0.0);
    let row_max = corners.iter().map(|c| c.y).fold(f64::NEG_INFINITY, f64::max).ceil().min(grid.rows() as f64);

    if !(col_min < col_max && row_min < row_max) {
        return Vec::new();
    }

    let mut values = Vec::new();
    for row in row_min as usize..row_max as usize {
        for col in col_min as usize..col_max as usize {
            let center = transform.apply(col as f64 + 0.5, row as f64 + 0.5);
            if polygon.contains(&center) {
                if let Some(v) = grid.get(row, col) {
                    values.push(v);
                }
            }
        }
    }
    values
}
