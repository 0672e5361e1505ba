//! Logger utility for application-wide logging
//!
//! Diagnostics go through the `log` macros; this logger only keeps the run
//! log file with the summary of every result table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::table::AttributeTable;

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger writing to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// A logger that discards everything written to it
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Writes a line to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs the shape and column layout of a result table
    ///
    /// # Arguments
    ///
    /// * `title` - Heading for the summary block
    /// * `table` - The table to describe
    pub fn log_table_summary(&self, title: &str, table: &AttributeTable) -> io::Result<()> {
        self.log(&format!("{}: {} row(s) x {} column(s)", title, table.row_count(), table.column_count()))?;

        for column in table.columns() {
            let valid: Vec<f64> = column.values.iter().copied().filter(|v| !v.is_nan()).collect();
            let message = if valid.is_empty() {
                format!("  Column: {}, Valid: 0", column.name)
            } else {
                let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
                let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                format!("  Column: {}, Valid: {}, Min: {}, Max: {}", column.name, valid.len(), min, max)
            };
            self.log(&message)?;
        }

        Ok(())
    }
}
