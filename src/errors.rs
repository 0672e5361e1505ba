//! Custom error types for raster value extraction

use std::fmt;
use std::io;

/// Errors raised by the extraction engine and its collaborators
#[derive(Debug)]
pub enum ProbeError {
    /// I/O error (writing result tables, reading job files)
    IoError(io::Error),
    /// Invalid combination of parameters
    Configuration(String),
    /// Buffer size below zero
    NegativeBufferSize(f64),
    /// Masking was requested for a point sample (half-window of zero)
    MaskedPointSample,
    /// Statistic name that has no aggregation rule
    UnsupportedStatistic(String),
    /// Points and raster declare different coordinate systems
    CrsMismatch {
        raster: u32,
        points: u32,
    },
    /// A point, or its aggregation window, falls outside the raster
    IndexOutOfBounds {
        point_id: usize,
        band: String,
        row: i64,
        col: i64,
        half_window: usize,
        rows: usize,
        cols: usize,
    },
    /// Requested band index does not exist
    MissingBand {
        index: usize,
        band_count: usize,
    },
    /// Grids or rasters that should share a shape do not
    ShapeMismatch(String),
    /// A column with this name is already present in the table
    DuplicateColumn(String),
    /// A column does not have one value per table row
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// No raster is registered under the given path
    RasterNotFound(String),
    /// A zonal worker failed while processing a tile
    WorkerFailure {
        tile: String,
        cause: Box<ProbeError>,
    },
    /// Malformed job configuration
    ConfigParse(String),
    /// Generic error with message
    GenericError(String),
}

impl ProbeError {
    /// True for errors raised while validating parameters, before any raster is read
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProbeError::Configuration(_)
                | ProbeError::NegativeBufferSize(_)
                | ProbeError::MaskedPointSample
                | ProbeError::UnsupportedStatistic(_)
                | ProbeError::CrsMismatch { .. }
                | ProbeError::ConfigParse(_)
        )
    }

    /// True when a point or its window fell outside the raster extent
    pub fn is_indexing(&self) -> bool {
        match self {
            ProbeError::IndexOutOfBounds { .. } => true,
            ProbeError::WorkerFailure { cause, .. } => cause.is_indexing(),
            _ => false,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::IoError(e) => write!(f, "I/O error: {}", e),
            ProbeError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ProbeError::NegativeBufferSize(size) => {
                write!(f, "Configuration error: buffer size must be non-negative, got {}", size)
            }
            ProbeError::MaskedPointSample => write!(
                f,
                "Configuration error: masking cannot be used when the buffer covers a single pixel"
            ),
            ProbeError::UnsupportedStatistic(name) => {
                write!(f, "Configuration error: unsupported statistic '{}'", name)
            }
            ProbeError::CrsMismatch { raster, points } => write!(
                f,
                "Configuration error: points are in EPSG:{} but the raster is in EPSG:{}",
                points, raster
            ),
            ProbeError::IndexOutOfBounds { point_id, band, row, col, half_window, rows, cols } => write!(
                f,
                "Indexing error: point {} maps to pixel ({}, {}) with half-window {} outside the {}x{} grid of {}",
                point_id, row, col, half_window, rows, cols, band
            ),
            ProbeError::MissingBand { index, band_count } => {
                write!(f, "Band {} requested but the raster has {} band(s)", index, band_count)
            }
            ProbeError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ProbeError::DuplicateColumn(name) => write!(f, "Column '{}' already exists", name),
            ProbeError::ColumnLength { column, expected, actual } => write!(
                f,
                "Column '{}' has {} values, table has {} rows",
                column, actual, expected
            ),
            ProbeError::RasterNotFound(path) => write!(f, "No raster registered at '{}'", path),
            ProbeError::WorkerFailure { tile, cause } => {
                write!(f, "Worker failure on tile '{}': {}", tile, cause)
            }
            ProbeError::ConfigParse(msg) => write!(f, "Failed to parse job configuration: {}", msg),
            ProbeError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::IoError(e) => Some(e),
            ProbeError::WorkerFailure { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ProbeError {
    fn from(error: io::Error) -> Self {
        ProbeError::IoError(error)
    }
}

impl From<String> for ProbeError {
    fn from(msg: String) -> Self {
        ProbeError::GenericError(msg)
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(error: serde_json::Error) -> Self {
        ProbeError::GenericError(format!("JSON serialization failed: {}", error))
    }
}

/// Result type for extraction operations
pub type ProbeResult<T> = Result<T, ProbeError>;
