//! In-memory raster model
//!
//! Bands, multi-band rasters, dated stacks, and the opener interface used
//! to resolve raster paths.

mod grid;
mod source;
mod temporal;
mod catalog;


pub use grid::Grid;
pub use source::{is_nodata, MultiBandRaster, RasterSource};
pub use temporal::{parse_iso_date, DateRange, Frequency, TemporalStack, TimeSlice};
pub use catalog::{InMemoryCatalog, RasterOpener};
