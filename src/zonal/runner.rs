//! Parallel zonal statistics across raster tiles
//!
//! Each tile is handled end-to-end by one worker of a dedicated thread pool
//! (all bands, all statistics). Workers report back tagged with the index
//! the tile was submitted under, and the coordinator merges their columns in
//! submission order once every worker has finished. A worker that panics
//! fails its tile like any other error.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use log::{debug, error, info};

use crate::errors::{ProbeError, ProbeResult};
use crate::table::{AttributeTable, Column};
use crate::utils::progress::ProgressTracker;
use crate::vector::Geometries;

use super::aggregator::ZonalAggregator;
use super::statistic::StatisticSet;
use super::tile::TileRef;

/// Runs zonal statistics over a list of tiles with a bounded worker pool
#[derive(Debug, Clone)]
pub struct TileZonalRunner {
    band_count: usize,
    statistics: StatisticSet,
    max_workers: usize,
    show_progress: bool,
}

impl TileZonalRunner {
    /// Create a runner
    ///
    /// # Arguments
    /// * `band_count` - Bands 1..=band_count are processed on every tile
    /// * `statistics` - Statistics, in output order
    /// * `max_workers` - Size of the worker pool
    pub fn new(band_count: usize, statistics: StatisticSet, max_workers: usize) -> ProbeResult<Self> {
        if band_count == 0 {
            return Err(ProbeError::Configuration("band count must be at least 1".to_string()));
        }
        if max_workers == 0 {
            return Err(ProbeError::Configuration("max_workers must be at least 1".to_string()));
        }

        Ok(TileZonalRunner {
            band_count,
            statistics,
            max_workers,
            show_progress: false,
        })
    }

    /// Show a progress bar while tiles are processed
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    pub fn statistics(&self) -> &StatisticSet {
        &self.statistics
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Compute every (tile, statistic, band) column for `geometries`.
    ///
    /// Columns are ordered by tile submission order, then statistic order,
    /// then band. If any tile fails, the run fails and no columns are merged.
    pub fn run<A: ZonalAggregator + ?Sized>(
        &self,
        geometries: &Geometries,
        tiles: &[TileRef],
        aggregator: &A,
    ) -> ProbeResult<AttributeTable> {
        let mut table = AttributeTable::new(geometries.ids().to_vec());

        info!(
            "Zonal run: {} tile(s) x {} band(s) x {} statistic(s) over {} geometries with {} worker(s)",
            tiles.len(), self.band_count, self.statistics.len(), geometries.len(), self.max_workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .thread_name(|i| format!("zonal-worker-{}", i))
            .build()
            .map_err(|e| ProbeError::Configuration(format!("Failed to start worker pool: {}", e)))?;

        let progress = if self.show_progress {
            ProgressTracker::new(tiles.len() as u64, "Zonal statistics")
        } else {
            ProgressTracker::hidden()
        };

        let (sender, receiver) = mpsc::channel();
        pool.scope(|scope| {
            for (request_id, tile) in tiles.iter().enumerate() {
                let sender = sender.clone();
                let progress = &progress;
                scope.spawn(move |_| {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        self.process_tile(geometries, tile, aggregator)
                    }))
                    .unwrap_or_else(|payload| Err(ProbeError::GenericError(format!(
                        "worker panicked: {}", panic_message(payload.as_ref())
                    ))));
                    progress.increment(1);
                    // The receiver outlives the scope, so this cannot fail.
                    let _ = sender.send((request_id, result));
                });
            }
        });
        drop(sender);
        progress.finish();

        // Completion order is arbitrary; slot results by request id.
        let mut slots: Vec<Option<ProbeResult<Vec<Column>>>> = (0..tiles.len()).map(|_| None).collect();
        for (request_id, result) in receiver {
            slots[request_id] = Some(result);
        }

        let mut merged = Vec::with_capacity(tiles.len() * self.band_count * self.statistics.len());
        for (tile, slot) in tiles.iter().zip(slots) {
            match slot {
                Some(Ok(columns)) => merged.extend(columns),
                Some(Err(cause)) => {
                    error!("Tile '{}' failed: {}", tile.path, cause);
                    return Err(ProbeError::WorkerFailure {
                        tile: tile.path.clone(),
                        cause: Box::new(cause),
                    });
                }
                None => {
                    return Err(ProbeError::WorkerFailure {
                        tile: tile.path.clone(),
                        cause: Box::new(ProbeError::GenericError("worker returned no result".to_string())),
                    });
                }
            }
        }

        table.extend_columns(merged)?;
        Ok(table)
    }

    /// All statistic and band columns for one tile
    fn process_tile<A: ZonalAggregator + ?Sized>(
        &self,
        geometries: &Geometries,
        tile: &TileRef,
        aggregator: &A,
    ) -> ProbeResult<Vec<Column>> {
        debug!("Processing tile '{}'", tile.path);

        let mut columns = Vec::with_capacity(self.band_count * self.statistics.len());
        for statistic in self.statistics.iter() {
            for band_index in 1..=self.band_count {
                let values = aggregator.compute(geometries, &tile.path, band_index, statistic)?;
                if values.len() != geometries.len() {
                    return Err(ProbeError::ColumnLength {
                        column: tile.column_name(statistic.name(), band_index),
                        expected: geometries.len(),
                        actual: values.len(),
                    });
                }
                columns.push(Column {
                    name: tile.column_name(statistic.name(), band_index),
                    values,
                });
            }
        }

        Ok(columns)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
