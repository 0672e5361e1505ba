//! Command pattern interfaces
//!
//! Jobs are executed as commands: each command owns its validated settings
//! and borrows the collaborators it needs (raster opener, geometries,
//! aggregator, logger) for its lifetime.

use crate::config::JobConfig;
use crate::errors::ProbeResult;
use crate::table::AttributeTable;

use super::CommandContext;

/// Represents an executable step of a job
pub trait Command {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Execute the command
    ///
    /// # Returns
    /// The result table (already written to the configured output, if any)
    fn execute(&self) -> ProbeResult<AttributeTable>;
}

/// Factory for creating the commands of a job
pub trait CommandFactory<'a> {
    /// Create one command per section of the job, extraction first
    ///
    /// # Arguments
    /// * `job` - Parsed job configuration
    /// * `context` - Collaborators the commands borrow
    ///
    /// # Returns
    /// The commands in execution order, or an error if a section's inputs are missing
    fn create_commands(&self, job: &'a JobConfig, context: &CommandContext<'a>) -> ProbeResult<Vec<Box<dyn Command + 'a>>>;
}
