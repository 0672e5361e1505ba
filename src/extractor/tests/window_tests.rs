//! Tests for window aggregation

use crate::coordinate::{PixelCoordinate, Point};
use crate::errors::ProbeError;
use crate::extractor::{half_window, AggregationMode, ExtractionParams, ExtractionSession, Statistic, WindowAggregator};
use crate::raster::Grid;
use crate::vector::PointSet;

use super::test_utils::{center_of, example_grid, example_raster, NODATA};

fn aggregator(half: usize, mode: AggregationMode) -> WindowAggregator {
    WindowAggregator::new(half, mode, NODATA, Statistic::Mean).unwrap()
}

#[test]
fn test_half_window_derivation() {
    assert_eq!(half_window(0.0, 1.0).unwrap(), 0);
    assert_eq!(half_window(1.0, 1.0).unwrap(), 0);
    assert_eq!(half_window(2.0, 1.0).unwrap(), 1);
    assert_eq!(half_window(30.0, 10.0).unwrap(), 1);
    assert_eq!(half_window(100.0, 10.0).unwrap(), 5);
}

#[test]
fn test_half_window_is_monotonic() {
    let mut buffer = 0.5;
    while buffer < 1000.0 {
        let small = half_window(buffer, 3.0).unwrap();
        let large = half_window(buffer * 2.0, 3.0).unwrap();
        assert!(large >= small, "buffer {} -> {}, doubled -> {}", buffer, small, large);
        buffer *= 1.7;
    }
}

#[test]
fn test_half_window_rejects_negative_buffer() {
    let err = half_window(-1.0, 1.0).unwrap_err();
    assert!(matches!(err, ProbeError::NegativeBufferSize(_)));
    assert!(err.is_configuration());
    assert!(half_window(f64::NAN, 1.0).is_err());
    assert!(half_window(2.0, 0.0).is_err());
}

#[test]
fn test_point_sample_returns_raw_value() {
    let grid = example_grid();
    let agg = aggregator(0, AggregationMode::IncludeNoData);
    for row in 0..4 {
        for col in 0..4 {
            let value = agg.aggregate(&grid, PixelCoordinate::new(row, col)).unwrap();
            assert_eq!(value, grid.get(row as usize, col as usize).unwrap());
        }
    }
}

#[test]
fn test_point_sample_returns_nodata_as_is() {
    let grid = example_grid();
    let value = aggregator(0, AggregationMode::IncludeNoData)
        .aggregate(&grid, PixelCoordinate::new(1, 1))
        .unwrap();
    assert_eq!(value, NODATA);
}

#[test]
fn test_masked_point_sample_is_rejected() {
    let err = WindowAggregator::new(0, AggregationMode::ExcludeNoData, NODATA, Statistic::Mean).unwrap_err();
    assert!(matches!(err, ProbeError::MaskedPointSample));
}

#[test]
fn test_masked_mean_skips_nodata() {
    let grid = example_grid();
    let value = aggregator(1, AggregationMode::ExcludeNoData)
        .aggregate(&grid, PixelCoordinate::new(1, 1))
        .unwrap();
    assert_eq!(value, 5.0);
}

#[test]
fn test_unmasked_mean_includes_nodata() {
    let grid = example_grid();
    let value = aggregator(1, AggregationMode::IncludeNoData)
        .aggregate(&grid, PixelCoordinate::new(1, 1))
        .unwrap();
    let expected = (1.0 + 2.0 + 3.0 + 4.0 + NODATA + 6.0 + 7.0 + 8.0 + 9.0) / 9.0;
    assert!((value - expected).abs() < 1e-9);
}

#[test]
fn test_all_nodata_window_is_nan() {
    let grid = Grid::filled(3, 3, NODATA).unwrap();
    let value = aggregator(1, AggregationMode::ExcludeNoData)
        .aggregate(&grid, PixelCoordinate::new(1, 1))
        .unwrap();
    assert!(value.is_nan());
}

#[test]
fn test_masked_mean_skips_nan_cells() {
    let grid = Grid::from_rows(vec![
        vec![f64::NAN, 2.0, 2.0],
        vec![2.0, 4.0, 2.0],
        vec![2.0, 2.0, NODATA],
    ]).unwrap();
    let value = aggregator(1, AggregationMode::ExcludeNoData)
        .aggregate(&grid, PixelCoordinate::new(1, 1))
        .unwrap();
    assert!((value - 16.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_window_off_the_edge_is_an_error() {
    let grid = example_grid();
    let agg = aggregator(1, AggregationMode::IncludeNoData);

    let oob = agg.aggregate(&grid, PixelCoordinate::new(0, 1)).unwrap_err();
    assert_eq!(oob.pixel, PixelCoordinate::new(0, 1));
    assert_eq!((oob.rows, oob.cols), (4, 4));

    assert!(agg.aggregate(&grid, PixelCoordinate::new(2, 3)).is_err());
    assert!(agg.aggregate(&grid, PixelCoordinate::new(2, 2)).is_ok());
}

#[test]
fn test_point_outside_grid_is_an_error() {
    let grid = example_grid();
    let agg = aggregator(0, AggregationMode::IncludeNoData);
    let oob = agg.aggregate(&grid, PixelCoordinate::new(10, 10)).unwrap_err();

    let err = oob.into_error(3, "band_1_x");
    assert!(err.is_indexing());
    assert!(err.to_string().contains("point 3"));
}

#[test]
fn test_extreme_pixel_does_not_overflow() {
    let grid = example_grid();
    let agg = aggregator(2, AggregationMode::IncludeNoData);
    assert!(agg.aggregate(&grid, PixelCoordinate::new(i64::MIN, 0)).is_err());
    assert!(agg.aggregate(&grid, PixelCoordinate::new(0, i64::MAX)).is_err());
}

#[test]
fn test_oversized_half_window_is_out_of_bounds() {
    let grid = example_grid();
    for half in [i64::MAX as usize, i64::MAX as usize + 1, usize::MAX] {
        let oob = aggregator(half, AggregationMode::IncludeNoData)
            .aggregate(&grid, PixelCoordinate::new(1, 1))
            .unwrap_err();
        assert_eq!(oob.half_window, half);
    }
}

#[test]
fn test_huge_buffer_fails_with_indexing_error() {
    let raster = example_raster();
    let points = PointSet::new(vec![Point::from(center_of(1, 1))]);
    for buffer in [1e19, 3e19, 1e30] {
        let err = ExtractionSession::new(ExtractionParams::new(buffer, AggregationMode::IncludeNoData))
            .unwrap()
            .run_bands(&raster, &points, "d")
            .unwrap_err();
        assert!(err.is_indexing(), "buffer {}: {}", buffer, err);
    }
}

#[test]
fn test_unknown_statistic_name() {
    assert_eq!("Mean".parse::<Statistic>().unwrap(), Statistic::Mean);
    let err = "median".parse::<Statistic>().unwrap_err();
    assert!(matches!(err, ProbeError::UnsupportedStatistic(_)));
}
