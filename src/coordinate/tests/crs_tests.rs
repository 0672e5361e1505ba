//! Tests for coordinate system identification

use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory};

#[test]
fn test_from_epsg_recognises_utm() {
    assert_eq!(CoordinateSystemFactory::from_epsg(32632), CoordinateSystem::UTM(32, true));
    assert_eq!(CoordinateSystemFactory::from_epsg(32733), CoordinateSystem::UTM(33, false));
    assert_eq!(CoordinateSystemFactory::from_epsg(2056), CoordinateSystem::Other(2056));
}

#[test]
fn test_from_string_round_trips_epsg() {
    let crs = CoordinateSystemFactory::from_string("epsg:32632").unwrap();
    assert_eq!(crs.epsg_code(), 32632);

    let crs = CoordinateSystemFactory::from_string("4326").unwrap();
    assert!(crs.is_geographic());

    assert!(CoordinateSystemFactory::from_string("WGS84").is_err());
}
