use log::info;

use crate::commands::{CommandContext, CommandFactory, ProbeCommandFactory};
use crate::config::JobConfig;
use crate::errors::ProbeResult;
use crate::extractor::{ExtractionParams, ExtractionSession};
use crate::raster::{RasterOpener, RasterSource};
use crate::table::AttributeTable;
use crate::utils::logger::Logger;
use crate::vector::{Geometries, PointSet};
use crate::zonal::{StatisticSet, TileRef, TileZonalRunner, ZonalAggregator};

/// Main interface to the RasterProbe library
pub struct RasterProbe {
    logger: Logger,
}

/// Tables produced by one job
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub extraction: Option<AttributeTable>,
    pub zonal: Option<AttributeTable>,
}

impl RasterProbe {
    /// Create a new RasterProbe instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to a run log; without one, summaries go nowhere
    ///
    /// # Returns
    /// A RasterProbe instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> ProbeResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(RasterProbe { logger })
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Sample every band of a raster at each point
    ///
    /// # Arguments
    /// * `raster` - Raster to sample
    /// * `points` - Points, in the raster's coordinate system
    /// * `params` - Buffer size, no-data handling and statistic
    /// * `date` - Date label appended to every column name (`band_<n>_<date>`)
    ///
    /// # Returns
    /// One row per point and one column per band, or the first error hit
    pub fn extract_points<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        points: &PointSet,
        params: ExtractionParams,
        date: &str,
    ) -> ProbeResult<AttributeTable> {
        let table = ExtractionSession::new(params)?.run_bands(raster, points, date)?;
        self.logger.log_table_summary("Point extraction", &table)?;
        Ok(table)
    }

    /// Sample every slice of a dated raster at each point
    ///
    /// Columns are named by the ISO date of each slice.
    pub fn extract_temporal<R: RasterSource + ?Sized>(
        &self,
        raster: &R,
        points: &PointSet,
        params: ExtractionParams,
    ) -> ProbeResult<AttributeTable> {
        let table = ExtractionSession::new(params)?.run_temporal(raster, points)?;
        self.logger.log_table_summary("Temporal extraction", &table)?;
        Ok(table)
    }

    /// Compute zonal statistics of `geometries` over a list of tiles
    ///
    /// # Arguments
    /// * `geometries` - Zones (polygons or points)
    /// * `tiles` - Tiles, in the order their columns should appear
    /// * `band_count` - Bands 1..=band_count are aggregated on every tile
    /// * `statistics` - Statistic names such as "mean" or "max"
    /// * `max_workers` - Number of tiles processed concurrently
    /// * `aggregator` - Computes per-geometry values for one band of one tile
    pub fn zonal_stats<A: ZonalAggregator + ?Sized>(
        &self,
        geometries: &Geometries,
        tiles: &[TileRef],
        band_count: usize,
        statistics: &[&str],
        max_workers: usize,
        aggregator: &A,
    ) -> ProbeResult<AttributeTable> {
        let runner = TileZonalRunner::new(band_count, StatisticSet::parse(statistics)?, max_workers)?;
        let table = runner.run(geometries, tiles, aggregator)?;
        self.logger.log_table_summary("Zonal statistics", &table)?;
        Ok(table)
    }

    /// Run every section of a job
    ///
    /// # Arguments
    /// * `job` - Parsed job configuration
    /// * `opener` - Resolves the raster paths named in the job
    /// * `points` - Points for the extraction section
    /// * `zones` - Geometries for the zonal section
    pub fn run_job(
        &self,
        job: &JobConfig,
        opener: &dyn RasterOpener,
        points: Option<&PointSet>,
        zones: Option<&Geometries>,
    ) -> ProbeResult<JobReport> {
        let mut context = CommandContext::new(opener, &self.logger);
        context.points = points;
        context.zones = zones;

        let commands = ProbeCommandFactory::new().create_commands(job, &context)?;

        let mut report = JobReport { extraction: None, zonal: None };
        for command in commands {
            info!("Running {}", command.name());
            let table = command.execute()?;
            match command.name() {
                "zonal-stats" => report.zonal = Some(table),
                _ => report.extraction = Some(table),
            }
        }

        Ok(report)
    }
}
