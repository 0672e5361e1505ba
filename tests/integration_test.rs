//! Integration tests for point extraction and zonal statistics

extern crate std;

use std::fs;

use chrono::NaiveDate;

use rasterprobe::coordinate::{CoordinateSystem, GeoTransform, Point};
use rasterprobe::extractor::{AggregationMode, ExtractionParams};
use rasterprobe::raster::{DateRange, Grid, InMemoryCatalog, MultiBandRaster, TemporalStack};
use rasterprobe::vector::{Geometries, PointSet, Polygon, PolygonSet};
use rasterprobe::zonal::{RasterZonalAggregator, TileRef};
use rasterprobe::{JobConfig, ProbeError, RasterProbe};

const NODATA: f64 = -9999.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 10 m pixels over a 5x5 grid, origin (500000, 4100050), values row * 10 + col
fn scene(offset: f64) -> MultiBandRaster {
    let values: Vec<f64> = (0..25)
        .map(|i| if i == 12 { NODATA } else { (i / 5 * 10 + i % 5) as f64 + offset })
        .collect();
    MultiBandRaster::new(
        GeoTransform::from_origin(500000.0, 4100050.0, 10.0, 10.0),
        NODATA,
        vec![Grid::new(5, 5, values).unwrap()],
    )
    .unwrap()
    .with_crs(CoordinateSystem::UTM(33, true))
}

fn pixel_center(row: usize, col: usize) -> Point {
    Point::new(500000.0 + col as f64 * 10.0 + 5.0, 4100050.0 - row as f64 * 10.0 - 5.0)
}

#[test]
fn test_masked_window_around_nodata_center() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let points = PointSet::new(vec![pixel_center(2, 2), pixel_center(1, 1)])
        .with_crs(CoordinateSystem::UTM(33, true));

    // 30 m buffer over 10 m pixels -> half-window 1
    let params = ExtractionParams::new(30.0, AggregationMode::ExcludeNoData);
    let table = probe.extract_points(&scene(0.0), &points, params, "20_04_2021").unwrap();

    // Neighbours of (2, 2): 11 12 13 21 23 31 32 33 -> mean 22
    std::assert_eq!(table.value(0, "band_1_20_04_2021"), Some(22.0));
    // Around (1, 1): 0 1 2 10 11 12 20 21 with (2, 2) masked
    std::assert_eq!(table.value(1, "band_1_20_04_2021"), Some(77.0 / 8.0));
}

#[test]
fn test_unmasked_point_sample_returns_sentinel() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let points = PointSet::new(vec![pixel_center(2, 2)]);

    let params = ExtractionParams::new(5.0, AggregationMode::IncludeNoData);
    let table = probe.extract_points(&scene(0.0), &points, params, "d").unwrap();
    std::assert_eq!(table.value(0, "band_1_d"), Some(NODATA));
}

#[test]
fn test_point_off_raster_fails_with_location() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let points = PointSet::new(vec![pixel_center(0, 0), Point::new(499990.0, 4100000.0)]);

    let params = ExtractionParams::new(0.0, AggregationMode::IncludeNoData);
    let err = probe.extract_points(&scene(0.0), &points, params, "d").unwrap_err();
    std::assert!(err.is_indexing());
    std::assert!(err.to_string().contains("point 1"));
}

#[test]
fn test_temporal_stack_extraction() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let scenes = vec![scene(0.0), scene(100.0), scene(200.0)];
    let dates = DateRange::parse("2021-04-20", "2021-05-20", "16D").unwrap();
    std::assert_eq!(dates.dates().len(), 2);

    let err = TemporalStack::from_rasters(&scenes, 1, &dates).unwrap_err();
    std::assert!(matches!(err, ProbeError::ShapeMismatch(_)));

    let stack = TemporalStack::from_rasters(&scenes[1..], 1, &dates).unwrap();
    std::assert_eq!(stack.slices()[1].date, NaiveDate::from_ymd_opt(2021, 5, 6).unwrap());

    let points = PointSet::new(vec![pixel_center(3, 1)]);
    let params = ExtractionParams::new(0.0, AggregationMode::IncludeNoData);
    let table = probe.extract_temporal(&stack, &points, params).unwrap();

    std::assert_eq!(table.column_names(), vec!["2021-04-20", "2021-05-06"]);
    std::assert_eq!(table.column("2021-05-06").unwrap(), &[231.0]);
}

#[test]
fn test_zonal_stats_over_tiles() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let catalog = InMemoryCatalog::new()
        .with("s2/tile_a.tif", scene(0.0))
        .with("s2/tile_b.tif", scene(1000.0));

    // Top-left 2x2 block of cells
    let zones = PolygonSet::new(vec![Polygon::square(500000.0, 4100030.0, 20.0).unwrap()])
        .with_crs(CoordinateSystem::UTM(33, true));
    let tiles = vec![TileRef::new("s2/tile_a.tif"), TileRef::new("s2/tile_b.tif")];
    let aggregator = RasterZonalAggregator::new(&catalog);

    let table = probe
        .zonal_stats(&Geometries::from(zones), &tiles, 1, &["min", "max", "mean"], 2, &aggregator)
        .unwrap();

    std::assert_eq!(table.column_names(), vec![
        "min_band_1_tile_a", "max_band_1_tile_a", "mean_band_1_tile_a",
        "min_band_1_tile_b", "max_band_1_tile_b", "mean_band_1_tile_b",
    ]);
    std::assert_eq!(table.value(0, "max_band_1_tile_a"), Some(11.0));
    std::assert_eq!(table.value(0, "mean_band_1_tile_b"), Some(1005.5));
}

#[test]
fn test_zonal_worker_failure_names_tile() {
    init_logging();
    let probe = RasterProbe::new(None).unwrap();
    let catalog = InMemoryCatalog::new().with("a.tif", scene(0.0));
    let zones = Geometries::from(PointSet::new(vec![pixel_center(0, 0)]));
    let tiles = vec![TileRef::new("a.tif"), TileRef::new("b.tif")];

    let err = probe
        .zonal_stats(&zones, &tiles, 1, &["mean"], 2, &RasterZonalAggregator::new(&catalog))
        .unwrap_err();
    match err {
        ProbeError::WorkerFailure { tile, .. } => std::assert_eq!(tile, "b.tif"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_job_file_end_to_end() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("run.log");
    let points_out = dir.path().join("points.json");
    let zonal_out = dir.path().join("zonal.csv");

    let job = JobConfig::from_str(&format!(r#"
        [extraction]
        raster = "scene.tif"
        buffer_size = 30
        masked = true
        date = "2021"
        output = "{}"

        [zonal]
        tiles = ["scene.tif"]
        band_count = 1
        statistics = ["count", "median"]
        max_workers = 1
        output = "{}"
    "#, points_out.display(), zonal_out.display())).unwrap();

    let catalog = InMemoryCatalog::new().with("scene.tif", scene(0.0));
    let points = PointSet::new(vec![pixel_center(2, 2)]);
    let zones = Geometries::from(PolygonSet::new(vec![
        Polygon::square(500010.0, 4100010.0, 30.0).unwrap(),
    ]));

    let probe = RasterProbe::new(log_path.to_str()).unwrap();
    let report = probe.run_job(&job, &catalog, Some(&points), Some(&zones)).unwrap();

    let extraction = report.extraction.unwrap();
    std::assert_eq!(extraction.value(0, "band_1_2021"), Some(22.0));

    // 3x3 block around the no-data centre
    let zonal = report.zonal.unwrap();
    std::assert_eq!(zonal.value(0, "count_band_1_scene"), Some(8.0));
    std::assert_eq!(zonal.value(0, "median_band_1_scene"), Some(22.0));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&points_out).unwrap()).unwrap();
    std::assert_eq!(json[0]["band_1_2021"], 22.0);
    let csv = fs::read_to_string(&zonal_out).unwrap();
    std::assert_eq!(csv.lines().next(), Some("id,count_band_1_scene,median_band_1_scene"));

    let log = fs::read_to_string(&log_path).unwrap();
    std::assert!(log.contains("Zonal statistics: 1 row(s) x 2 column(s)"));
}
