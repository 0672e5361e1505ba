//! Coordinate handling for geospatial data
//!
//! Points, bounding boxes, coordinate system identifiers and the affine
//! transform that ties raster pixels to map coordinates.

mod bbox;
mod point;
mod transform;
mod crs;

#[cfg(test)]
mod tests;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
pub use self::transform::{GeoTransform, PixelCoordinate};
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
