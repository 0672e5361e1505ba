//! Zonal statistics over raster tiles
//!
//! A `TileZonalRunner` fans a set of tiles out to a worker pool; each worker
//! asks a `ZonalAggregator` for one column per (statistic, band) of its
//! tile, and the runner stitches the columns back together in the order the
//! tiles were submitted.

mod statistic;
mod tile;
mod aggregator;
mod runner;

#[cfg(test)]
mod tests;

pub use statistic::{StatisticSet, ZonalStatistic};
pub use tile::TileRef;
pub use aggregator::{zone_values, RasterZonalAggregator, ZonalAggregator};
pub use runner::TileZonalRunner;
