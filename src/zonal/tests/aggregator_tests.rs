//! Tests for the built-in zonal aggregator

use crate::coordinate::{CoordinateSystem, GeoTransform, Point};
use crate::raster::{Grid, InMemoryCatalog, MultiBandRaster};
use crate::vector::{Geometries, PointSet, Polygon, PolygonSet};
use crate::zonal::{RasterZonalAggregator, ZonalAggregator, ZonalStatistic};

const NODATA: f64 = -1.0;

/// 4x4 unit grid with top-left corner at (0, 4); cell value = row * 4 + col
fn catalog() -> InMemoryCatalog {
    let values: Vec<f64> = (0..16).map(|v| v as f64).collect();
    let mut with_nodata = values.clone();
    with_nodata[5] = NODATA;

    let raster = MultiBandRaster::new(
        GeoTransform::from_origin(0.0, 4.0, 1.0, 1.0),
        NODATA,
        vec![Grid::new(4, 4, values).unwrap(), Grid::new(4, 4, with_nodata).unwrap()],
    ).unwrap();

    InMemoryCatalog::new().with("tile.tif", raster)
}

#[test]
fn test_polygon_mean_over_cell_centres() {
    let catalog = catalog();
    let aggregator = RasterZonalAggregator::new(&catalog);

    // Covers the top-left 2x2 block: cells 0, 1, 4, 5
    let geometries = Geometries::from(PolygonSet::new(vec![Polygon::square(0.0, 2.0, 2.0).unwrap()]));

    let mean = aggregator.compute(&geometries, "tile.tif", 1, ZonalStatistic::Mean).unwrap();
    assert_eq!(mean, vec![2.5]);

    let count = aggregator.compute(&geometries, "tile.tif", 1, ZonalStatistic::Count).unwrap();
    assert_eq!(count, vec![4.0]);
}

#[test]
fn test_nodata_cells_are_excluded() {
    let catalog = catalog();
    let aggregator = RasterZonalAggregator::new(&catalog);
    let geometries = Geometries::from(PolygonSet::new(vec![Polygon::square(0.0, 2.0, 2.0).unwrap()]));

    let mean = aggregator.compute(&geometries, "tile.tif", 2, ZonalStatistic::Mean).unwrap();
    assert!((mean[0] - 5.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_polygon_outside_raster_is_nan() {
    let catalog = catalog();
    let aggregator = RasterZonalAggregator::new(&catalog);
    let geometries = Geometries::from(PolygonSet::new(vec![Polygon::square(20.0, 20.0, 2.0).unwrap()]));

    let max = aggregator.compute(&geometries, "tile.tif", 1, ZonalStatistic::Max).unwrap();
    assert!(max[0].is_nan());
}

#[test]
fn test_points_take_containing_cell() {
    let catalog = catalog();
    let aggregator = RasterZonalAggregator::new(&catalog);
    let geometries = Geometries::from(PointSet::new(vec![
        Point::new(3.5, 0.5),
        Point::new(1.5, 2.5),
        Point::new(-3.0, 1.0),
    ]));

    let values = aggregator.compute(&geometries, "tile.tif", 2, ZonalStatistic::Mean).unwrap();
    assert_eq!(values[0], 15.0);
    assert!(values[1].is_nan());
    assert!(values[2].is_nan());
}

#[test]
fn test_missing_raster_and_band() {
    let catalog = catalog();
    let aggregator = RasterZonalAggregator::new(&catalog);
    let geometries = Geometries::from(PointSet::new(vec![Point::new(0.5, 0.5)]));

    assert!(aggregator.compute(&geometries, "other.tif", 1, ZonalStatistic::Mean).is_err());
    assert!(aggregator.compute(&geometries, "tile.tif", 3, ZonalStatistic::Mean).is_err());
}

#[test]
fn test_crs_mismatch() {
    let raster = MultiBandRaster::new(
        GeoTransform::from_origin(0.0, 1.0, 1.0, 1.0),
        NODATA,
        vec![Grid::filled(1, 1, 1.0).unwrap()],
    ).unwrap().with_crs(CoordinateSystem::WebMercator);
    let catalog = InMemoryCatalog::new().with("t.tif", raster);
    let aggregator = RasterZonalAggregator::new(&catalog);

    let geometries = Geometries::from(PointSet::new(vec![Point::new(0.5, 0.5)]).with_crs(CoordinateSystem::WGS84));
    let err = aggregator.compute(&geometries, "t.tif", 1, ZonalStatistic::Mean).unwrap_err();
    assert!(err.is_configuration());
}
