//! Ordered point collections

use crate::coordinate::{CoordinateSystem, Point};
use crate::errors::{ProbeError, ProbeResult};
use crate::raster::RasterSource;

/// Ordered points, each carrying the row identifier it keeps in result tables
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    ids: Vec<usize>,
    points: Vec<Point>,
    crs: Option<CoordinateSystem>,
}

impl PointSet {
    /// Points identified by their position (0, 1, 2, ...)
    pub fn new(points: Vec<Point>) -> Self {
        PointSet {
            ids: (0..points.len()).collect(),
            points,
            crs: None,
        }
    }

    /// Points with explicit identifiers
    pub fn with_ids(ids: Vec<usize>, points: Vec<Point>) -> ProbeResult<Self> {
        if ids.len() != points.len() {
            return Err(ProbeError::ShapeMismatch(format!(
                "{} identifiers for {} points", ids.len(), points.len()
            )));
        }
        Ok(PointSet { ids, points, crs: None })
    }

    /// Points from (x, y) pairs
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        PointSet::new(coords.iter().copied().map(Point::from).collect())
    }

    /// Attach a coordinate system
    pub fn with_crs(mut self, crs: CoordinateSystem) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn crs(&self) -> Option<CoordinateSystem> {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over (id, point) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point)> {
        self.ids.iter().copied().zip(self.points.iter())
    }

    /// Keep only the points that land on a pixel of `raster`, preserving
    /// identifiers and order.
    ///
    /// Lets callers drop points that would otherwise fail extraction with an
    /// indexing error.
    pub fn within<R: RasterSource + ?Sized>(&self, raster: &R) -> PointSet {
        let (ids, points) = self.iter()
            .filter(|(_, p)| raster.contains_point(p))
            .map(|(id, p)| (id, *p))
            .unzip();

        PointSet { ids, points, crs: self.crs }
    }
}
