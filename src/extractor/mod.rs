//! Point value extraction
//!
//! `PixelIndexer` turns coordinates into pixel positions,
//! `WindowAggregator` reduces the window around each position to one value,
//! and `ExtractionSession` repeats this over every band or time slice.

mod pixel_indexer;
mod statistic;
mod window;
mod session;

#[cfg(test)]
mod tests;

pub use pixel_indexer::{index, PixelIndexer};
pub use statistic::Statistic;
pub use window::{half_window, AggregationMode, OutOfBounds, WindowAggregator};
pub use session::{ExtractionParams, ExtractionSession, OutputMode};
