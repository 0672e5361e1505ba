//! Map coordinates to pixel indices

use crate::coordinate::{GeoTransform, PixelCoordinate, Point};
use crate::errors::ProbeResult;

/// Converts map coordinates to (row, col) using the inverse of a raster transform.
///
/// No bounds checking happens here; positions outside the grid surface later
/// as indexing errors during aggregation.
#[derive(Debug, Clone, Copy)]
pub struct PixelIndexer {
    inverse: GeoTransform,
}

impl PixelIndexer {
    /// Build an indexer for a raster transform
    pub fn new(transform: &GeoTransform) -> ProbeResult<Self> {
        Ok(PixelIndexer {
            inverse: transform.invert()?,
        })
    }

    /// Pixel containing `point`, found by flooring its fractional position
    pub fn index_point(&self, point: &Point) -> PixelCoordinate {
        let fractional = self.inverse.apply(point.x, point.y);
        PixelCoordinate::new(floor_to_index(fractional.y), floor_to_index(fractional.x))
    }

    /// Pixel positions for a sequence of points, in order
    pub fn index(&self, points: &[Point]) -> Vec<PixelCoordinate> {
        points.iter().map(|p| self.index_point(p)).collect()
    }
}

// Non-finite positions get a sentinel that no grid contains.
fn floor_to_index(value: f64) -> i64 {
    if value.is_finite() {
        value.floor() as i64
    } else {
        i64::MIN
    }
}

/// Index `points` against `transform` in one call
pub fn index(points: &[Point], transform: &GeoTransform) -> ProbeResult<Vec<PixelCoordinate>> {
    Ok(PixelIndexer::new(transform)?.index(points))
}
