//! Utility modules for common functionality
//!
//! Run logging and progress reporting shared by the extraction and zonal
//! pipelines.

pub mod logger;
pub mod progress;
