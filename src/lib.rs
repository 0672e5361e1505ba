pub mod errors;
pub mod coordinate;
pub mod raster;
pub mod vector;
pub mod table;
pub mod extractor;
pub mod zonal;
pub mod config;
pub mod commands;
pub mod utils;
pub mod api;

pub use crate::api::{JobReport, RasterProbe};

pub use errors::{ProbeError, ProbeResult};
pub use coordinate::{BoundingBox, CoordinateSystem, GeoTransform, PixelCoordinate, Point};
pub use raster::{Grid, InMemoryCatalog, MultiBandRaster, RasterOpener, RasterSource, TemporalStack};
pub use vector::{Geometries, PointSet, Polygon, PolygonSet};
pub use table::AttributeTable;
pub use extractor::{AggregationMode, ExtractionParams, ExtractionSession, PixelIndexer, WindowAggregator};
pub use zonal::{StatisticSet, TileRef, TileZonalRunner, ZonalAggregator, ZonalStatistic};
pub use config::JobConfig;
