//! Polygon geometries

use crate::coordinate::{BoundingBox, CoordinateSystem, Point};
use crate::errors::{ProbeError, ProbeResult};

/// Simple polygon with an exterior ring and optional holes.
///
/// Rings are stored without requiring the closing vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<Point>,
    holes: Vec<Vec<Point>>,
    bbox: BoundingBox,
}

impl Polygon {
    /// Create a polygon from its exterior ring
    pub fn new(exterior: Vec<Point>) -> ProbeResult<Self> {
        Polygon::with_holes(exterior, Vec::new())
    }

    /// Create a polygon with interior rings
    pub fn with_holes(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> ProbeResult<Self> {
        let exterior = open_ring(exterior);
        if exterior.len() < 3 {
            return Err(ProbeError::ShapeMismatch(format!(
                "polygon ring needs at least 3 distinct vertices, got {}", exterior.len()
            )));
        }
        let bbox = BoundingBox::enclosing(&exterior)
            .ok_or_else(|| ProbeError::ShapeMismatch("polygon ring is empty".to_string()))?;
        let holes = holes.into_iter().map(open_ring).filter(|h| h.len() >= 3).collect();

        Ok(Polygon { exterior, holes, bbox })
    }

    /// Axis-aligned square cell with lower-left corner (`x`, `y`)
    pub fn square(x: f64, y: f64, size: f64) -> ProbeResult<Self> {
        Polygon::new(vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ])
    }

    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    /// Bounding box of the exterior ring
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Point-in-polygon test (even-odd rule); holes are excluded
    pub fn contains(&self, point: &Point) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }
}

fn open_ring(mut ring: Vec<Point>) -> Vec<Point> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn ring_contains(ring: &[Point], point: &Point) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (&ring[i], &ring[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Ordered polygons with row identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSet {
    ids: Vec<usize>,
    polygons: Vec<Polygon>,
    crs: Option<CoordinateSystem>,
}

impl PolygonSet {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        PolygonSet {
            ids: (0..polygons.len()).collect(),
            polygons,
            crs: None,
        }
    }

    pub fn with_ids(ids: Vec<usize>, polygons: Vec<Polygon>) -> ProbeResult<Self> {
        if ids.len() != polygons.len() {
            return Err(ProbeError::ShapeMismatch(format!(
                "{} identifiers for {} polygons", ids.len(), polygons.len()
            )));
        }
        Ok(PolygonSet { ids, polygons, crs: None })
    }

    pub fn with_crs(mut self, crs: CoordinateSystem) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn crs(&self) -> Option<CoordinateSystem> {
        self.crs
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
