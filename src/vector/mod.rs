//! Vector geometries consumed by the extraction engine

mod point_set;
mod polygon;

#[cfg(test)]
mod tests;

pub use point_set::PointSet;
pub use polygon::{Polygon, PolygonSet};

use crate::coordinate::CoordinateSystem;

/// Geometries a zonal run can aggregate over
#[derive(Debug, Clone, PartialEq)]
pub enum Geometries {
    Points(PointSet),
    Polygons(PolygonSet),
}

impl Geometries {
    /// Row identifiers, in order
    pub fn ids(&self) -> &[usize] {
        match self {
            Geometries::Points(points) => points.ids(),
            Geometries::Polygons(polygons) => polygons.ids(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub fn crs(&self) -> Option<CoordinateSystem> {
        match self {
            Geometries::Points(points) => points.crs(),
            Geometries::Polygons(polygons) => polygons.crs(),
        }
    }
}

impl From<PointSet> for Geometries {
    fn from(points: PointSet) -> Self {
        Geometries::Points(points)
    }
}

impl From<PolygonSet> for Geometries {
    fn from(polygons: PolygonSet) -> Self {
        Geometries::Polygons(polygons)
    }
}
