//! Shared fixtures for extraction tests

use crate::coordinate::GeoTransform;
use crate::raster::{Grid, MultiBandRaster};

pub const NODATA: f64 = -9999.0;

/// 4x4 grid, unit pixels, top-left corner at (0, 4).
///
/// The 3x3 block around pixel (1, 1) is `[[1,2,3],[4,-9999,6],[7,8,9]]`.
pub fn example_grid() -> Grid {
    Grid::from_rows(vec![
        vec![1.0, 2.0, 3.0, 10.0],
        vec![4.0, NODATA, 6.0, 11.0],
        vec![7.0, 8.0, 9.0, 12.0],
        vec![13.0, 14.0, 15.0, 16.0],
    ]).unwrap()
}

pub fn unit_transform() -> GeoTransform {
    GeoTransform::from_origin(0.0, 4.0, 1.0, 1.0)
}

/// Map coordinate of the centre of pixel (row, col) under `unit_transform`
pub fn center_of(row: usize, col: usize) -> (f64, f64) {
    (col as f64 + 0.5, 4.0 - row as f64 - 0.5)
}

/// Example raster with a second band holding ten times the first
pub fn example_raster() -> MultiBandRaster {
    let first = example_grid();
    let second = Grid::new(4, 4, first.values().iter().map(|v| {
        if *v == NODATA { NODATA } else { v * 10.0 }
    }).collect()).unwrap();

    MultiBandRaster::new(unit_transform(), NODATA, vec![first, second]).unwrap()
}
