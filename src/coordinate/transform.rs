//! Affine pixel transform
//!
//! Coefficients follow the GDAL ordering:
//! `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`,
//! so that
//!
//! ```text
//! x = c[0] + col * c[1] + row * c[2]
//! y = c[3] + col * c[4] + row * c[5]
//! ```

use super::point::Point;
use super::bbox::BoundingBox;
use crate::errors::{ProbeError, ProbeResult};

/// Integer pixel position. Not guaranteed to lie inside any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelCoordinate {
    pub row: i64,
    pub col: i64,
}

impl PixelCoordinate {
    pub fn new(row: i64, col: i64) -> Self {
        PixelCoordinate { row, col }
    }
}

/// Six-coefficient affine transform between pixel and map space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    coefficients: [f64; 6],
}

impl GeoTransform {
    /// Build a transform from its six coefficients
    pub fn new(coefficients: [f64; 6]) -> Self {
        GeoTransform { coefficients }
    }

    /// North-up transform with the top-left corner at (`origin_x`, `origin_y`).
    ///
    /// `pixel_height` is given as a positive size; rows advance southwards.
    pub fn from_origin(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        GeoTransform::new([origin_x, pixel_width, 0.0, origin_y, 0.0, -pixel_height])
    }

    /// Access the raw coefficients
    pub fn coefficients(&self) -> &[f64; 6] {
        &self.coefficients
    }

    /// Map a (fractional) pixel position to map coordinates
    pub fn apply(&self, col: f64, row: f64) -> Point {
        let c = &self.coefficients;
        Point::new(
            c[0] + col * c[1] + row * c[2],
            c[3] + col * c[4] + row * c[5],
        )
    }

    fn determinant(&self) -> f64 {
        let c = &self.coefficients;
        c[1] * c[5] - c[2] * c[4]
    }

    /// Inverse transform, mapping map coordinates to fractional (col, row).
    ///
    /// Fails for degenerate transforms whose pixel axes are collinear.
    pub fn invert(&self) -> ProbeResult<GeoTransform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(ProbeError::Configuration(format!(
                "Affine transform {:?} is not invertible", self.coefficients
            )));
        }

        let c = &self.coefficients;
        let i1 = c[5] / det;
        let i2 = -c[2] / det;
        let i4 = -c[4] / det;
        let i5 = c[1] / det;
        let i0 = -(c[0] * i1 + c[3] * i2);
        let i3 = -(c[0] * i4 + c[3] * i5);

        Ok(GeoTransform::new([i0, i1, i2, i3, i4, i5]))
    }

    /// Ground size of one pixel along the column axis
    pub fn pixel_size(&self) -> f64 {
        let c = &self.coefficients;
        (c[1] * c[1] + c[4] * c[4]).sqrt()
    }

    /// Map-space extent covered by a grid of the given size
    pub fn bounds(&self, rows: usize, cols: usize) -> BoundingBox {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(cols as f64, 0.0),
            self.apply(0.0, rows as f64),
            self.apply(cols as f64, rows as f64),
        ];
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in &corners {
            min_x = min_x.min(corner.x);
            min_y = min_y.min(corner.y);
            max_x = max_x.max(corner.x);
            max_y = max_y.max(corner.y);
        }
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }
}
