//! Tests for coordinate to pixel indexing

use crate::coordinate::{GeoTransform, PixelCoordinate, Point};
use crate::extractor::{index, PixelIndexer};

use super::test_utils::{center_of, unit_transform};

#[test]
fn test_pixel_centers_map_to_their_pixel() {
    let indexer = PixelIndexer::new(&unit_transform()).unwrap();
    for row in 0..4 {
        for col in 0..4 {
            let (x, y) = center_of(row, col);
            let pixel = indexer.index_point(&Point::new(x, y));
            assert_eq!(pixel, PixelCoordinate::new(row as i64, col as i64));
        }
    }
}

#[test]
fn test_index_floors_fractional_positions() {
    let transform = GeoTransform::from_origin(100.0, 200.0, 10.0, 10.0);
    let pixels = index(&[Point::new(119.9, 180.1), Point::new(100.0, 200.0)], &transform).unwrap();
    assert_eq!(pixels, vec![PixelCoordinate::new(1, 1), PixelCoordinate::new(0, 0)]);
}

#[test]
fn test_outside_points_are_not_clamped() {
    let indexer = PixelIndexer::new(&unit_transform()).unwrap();
    assert_eq!(indexer.index_point(&Point::new(-0.5, 4.5)), PixelCoordinate::new(-1, -1));
    assert_eq!(indexer.index_point(&Point::new(10.5, -6.5)), PixelCoordinate::new(10, 10));
}

#[test]
fn test_non_finite_coordinates_index_nowhere() {
    let indexer = PixelIndexer::new(&unit_transform()).unwrap();
    let pixel = indexer.index_point(&Point::new(f64::NAN, 1.0));
    assert_eq!(pixel.col, i64::MIN);
}

#[test]
fn test_indexing_preserves_order() {
    let points: Vec<Point> = [(3, 0), (0, 2), (2, 2)].iter()
        .map(|(r, c)| Point::from(center_of(*r, *c)))
        .collect();
    let pixels = index(&points, &unit_transform()).unwrap();
    assert_eq!(pixels, vec![
        PixelCoordinate::new(3, 0),
        PixelCoordinate::new(0, 2),
        PixelCoordinate::new(2, 2),
    ]);
}
