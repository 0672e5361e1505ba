//! Zonal statistics command

use log::info;

use crate::commands::command_traits::Command;
use crate::config::ZonalConfig;
use crate::errors::ProbeResult;
use crate::raster::RasterOpener;
use crate::table::AttributeTable;
use crate::utils::logger::Logger;
use crate::vector::Geometries;
use crate::zonal::{RasterZonalAggregator, TileZonalRunner, ZonalAggregator};

/// Command for computing per-zone statistics over a list of tiles
pub struct ZonalStatsCommand<'a> {
    /// Validated zonal settings
    config: &'a ZonalConfig,
    /// Runner built from `config`
    runner: TileZonalRunner,
    /// Resolves tile paths for the built-in aggregator
    opener: &'a dyn RasterOpener,
    /// Zones to aggregate over
    zones: &'a Geometries,
    /// Aggregator overriding the built-in one
    aggregator: Option<&'a dyn ZonalAggregator>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ZonalStatsCommand<'a> {
    pub fn new(
        config: &'a ZonalConfig,
        opener: &'a dyn RasterOpener,
        zones: &'a Geometries,
        logger: &'a Logger,
    ) -> ProbeResult<Self> {
        Ok(ZonalStatsCommand {
            config,
            runner: config.runner()?,
            opener,
            zones,
            aggregator: None,
            logger,
        })
    }

    /// Use an external aggregator instead of reading tiles through the opener
    pub fn with_aggregator(mut self, aggregator: &'a dyn ZonalAggregator) -> Self {
        self.aggregator = Some(aggregator);
        self
    }
}

impl<'a> Command for ZonalStatsCommand<'a> {
    fn name(&self) -> &'static str {
        "zonal-stats"
    }

    fn execute(&self) -> ProbeResult<AttributeTable> {
        let table = match self.aggregator {
            Some(aggregator) => {
                info!("Using external zonal aggregator");
                self.runner.run(self.zones, &self.config.tiles, aggregator)?
            }
            None => {
                let aggregator = RasterZonalAggregator::new(self.opener);
                self.runner.run(self.zones, &self.config.tiles, &aggregator)?
            }
        };
        self.logger.log_table_summary("Zonal statistics", &table)?;

        if let Some(output) = &self.config.output {
            table.save_to_file(&output.path, &output.format)?;
        }

        Ok(table)
    }
}
