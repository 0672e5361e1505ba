//! Job command implementations
//!
//! This module turns a parsed `JobConfig` into commands using the Command
//! pattern: `ExtractPointsCommand` for the `[extraction]` section and
//! `ZonalStatsCommand` for the `[zonal]` section.

pub mod command_traits;
pub mod extract_points_command;
pub mod zonal_stats_command;


pub use command_traits::{Command, CommandFactory};
pub use extract_points_command::ExtractPointsCommand;
pub use zonal_stats_command::ZonalStatsCommand;

use log::info;

use crate::config::JobConfig;
use crate::errors::{ProbeError, ProbeResult};
use crate::raster::RasterOpener;
use crate::utils::logger::Logger;
use crate::vector::{Geometries, PointSet};
use crate::zonal::ZonalAggregator;

/// Collaborators shared by the commands of one job
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// Resolves raster paths named in the job
    pub opener: &'a dyn RasterOpener,
    /// Points sampled by the extraction section
    pub points: Option<&'a PointSet>,
    /// Zones aggregated by the zonal section
    pub zones: Option<&'a Geometries>,
    /// Aggregator for the zonal section; defaults to reading tiles through `opener`
    pub aggregator: Option<&'a dyn ZonalAggregator>,
    /// Logger for recording operations
    pub logger: &'a Logger,
}

impl<'a> CommandContext<'a> {
    pub fn new(opener: &'a dyn RasterOpener, logger: &'a Logger) -> Self {
        CommandContext {
            opener,
            points: None,
            zones: None,
            aggregator: None,
            logger,
        }
    }

    pub fn with_points(mut self, points: &'a PointSet) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_zones(mut self, zones: &'a Geometries) -> Self {
        self.zones = Some(zones);
        self
    }

    pub fn with_aggregator(mut self, aggregator: &'a dyn ZonalAggregator) -> Self {
        self.aggregator = Some(aggregator);
        self
    }
}

/// Factory for creating command instances from a job configuration
pub struct ProbeCommandFactory;

impl ProbeCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ProbeCommandFactory
    }
}

impl Default for ProbeCommandFactory {
    fn default() -> Self {
        ProbeCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for ProbeCommandFactory {
    fn create_commands(&self, job: &'a JobConfig, context: &CommandContext<'a>) -> ProbeResult<Vec<Box<dyn Command + 'a>>> {
        let mut commands: Vec<Box<dyn Command + 'a>> = Vec::new();

        if let Some(extraction) = &job.extraction {
            let points = context.points.ok_or_else(|| ProbeError::Configuration(
                "the extraction section needs a point set".to_string()
            ))?;
            commands.push(Box::new(ExtractPointsCommand::new(extraction, context.opener, points, context.logger)));
        }

        if let Some(zonal) = &job.zonal {
            let zones = context.zones.ok_or_else(|| ProbeError::Configuration(
                "the zonal section needs zone geometries".to_string()
            ))?;
            let mut command = ZonalStatsCommand::new(zonal, context.opener, zones, context.logger)?;
            if let Some(aggregator) = context.aggregator {
                command = command.with_aggregator(aggregator);
            }
            commands.push(Box::new(command));
        }

        info!("Job expands to {} command(s)", commands.len());
        Ok(commands)
    }
}
