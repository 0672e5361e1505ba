//! Tests for point sets and polygons

use crate::coordinate::{BoundingBox, GeoTransform, Point};
use crate::raster::{Grid, MultiBandRaster};
use crate::vector::{Geometries, PointSet, Polygon, PolygonSet};

#[test]
fn test_point_set_default_ids() {
    let points = PointSet::from_coords(&[(1.0, 2.0), (3.0, 4.0)]);
    assert_eq!(points.ids(), &[0, 1]);
    assert_eq!(points.len(), 2);
}

#[test]
fn test_point_set_with_ids_checks_length() {
    assert!(PointSet::with_ids(vec![5], vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_err());
}

#[test]
fn test_within_keeps_ids_and_order() {
    let points = PointSet::with_ids(
        vec![10, 11, 12, 13],
        vec![
            Point::new(0.5, 0.5),
            Point::new(9.0, 9.0),
            Point::new(2.5, 1.5),
            Point::new(-1.0, 0.0),
        ],
    ).unwrap();

    let raster = MultiBandRaster::new(
        GeoTransform::from_origin(0.0, 4.0, 1.0, 1.0),
        0.0,
        vec![Grid::filled(4, 4, 1.0).unwrap()],
    ).unwrap();

    let inside = points.within(&raster);
    assert_eq!(inside.ids(), &[10, 12]);
    assert_eq!(inside.points()[1], Point::new(2.5, 1.5));
}

#[test]
fn test_polygon_contains_and_holes() {
    let exterior = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
        Point::new(0.0, 0.0),
    ];
    let hole = vec![
        Point::new(4.0, 4.0),
        Point::new(6.0, 4.0),
        Point::new(6.0, 6.0),
        Point::new(4.0, 6.0),
    ];
    let polygon = Polygon::with_holes(exterior, vec![hole]).unwrap();

    assert_eq!(polygon.exterior().len(), 4);
    assert!(polygon.contains(&Point::new(1.0, 1.0)));
    assert!(!polygon.contains(&Point::new(5.0, 5.0)));
    assert!(!polygon.contains(&Point::new(11.0, 5.0)));
    assert_eq!(polygon.bbox(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_polygon_needs_three_vertices() {
    assert!(Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_err());
}

#[test]
fn test_geometries_ids() {
    let polygons = PolygonSet::with_ids(
        vec![7, 3],
        vec![Polygon::square(0.0, 0.0, 1.0).unwrap(), Polygon::square(1.0, 0.0, 1.0).unwrap()],
    ).unwrap();
    let geometries = Geometries::from(polygons);
    assert_eq!(geometries.ids(), &[7, 3]);
    assert_eq!(geometries.len(), 2);
}
