//! Point extraction command
//!
//! Opens the configured raster (or stacks several rasters along time),
//! samples it at every point and writes the result table.

use std::sync::Arc;

use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::{ExtractionConfig, RasterInput};
use crate::errors::ProbeResult;
use crate::raster::{RasterOpener, RasterSource, TemporalStack};
use crate::table::AttributeTable;
use crate::utils::logger::Logger;
use crate::vector::PointSet;

/// Command for sampling raster values at points
pub struct ExtractPointsCommand<'a> {
    /// Validated extraction settings
    config: &'a ExtractionConfig,
    /// Resolves raster paths
    opener: &'a dyn RasterOpener,
    /// Points to sample
    points: &'a PointSet,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractPointsCommand<'a> {
    pub fn new(
        config: &'a ExtractionConfig,
        opener: &'a dyn RasterOpener,
        points: &'a PointSet,
        logger: &'a Logger,
    ) -> Self {
        ExtractPointsCommand {
            config,
            opener,
            points,
            logger,
        }
    }

    /// Resolve the configured input to a single raster source
    fn open_input(&self) -> ProbeResult<Arc<dyn RasterSource>> {
        match &self.config.input {
            RasterInput::Single(path) => {
                info!("Opening raster {}", path);
                self.opener.open(path)
            }
            RasterInput::Stack { paths, band_index, dates } => {
                info!("Stacking band {} of {} rasters", band_index, paths.len());
                let rasters = paths.iter()
                    .map(|path| self.opener.open(path))
                    .collect::<ProbeResult<Vec<_>>>()?;
                let stack = TemporalStack::from_rasters(&rasters, *band_index, dates)?;
                Ok(Arc::new(stack))
            }
        }
    }
}

impl<'a> Command for ExtractPointsCommand<'a> {
    fn name(&self) -> &'static str {
        "extract-points"
    }

    fn execute(&self) -> ProbeResult<AttributeTable> {
        let session = self.config.session()?;
        let raster = self.open_input()?;

        let outside = self.points.len() - self.points.within(&*raster).len();
        if outside > 0 {
            warn!(
                "{} point(s) fall outside the raster extent {:?}; extraction will fail",
                outside, raster.bounds()
            );
        }

        let table = session.run(&*raster, self.points, &self.config.output_mode)?;
        self.logger.log_table_summary("Point extraction", &table)?;

        if let Some(output) = &self.config.output {
            table.save_to_file(&output.path, &output.format)?;
        }

        Ok(table)
    }
}
