//! Job configuration
//!
//! A job file is TOML with an optional `[extraction]` table and an optional
//! `[zonal]` table; at least one must be present. Everything is validated
//! while parsing, so a `JobConfig` that exists is runnable.
//!
//! ```toml
//! [extraction]
//! raster = "s2_20210420.tif"
//! buffer_size = 20.0
//! masked = true
//! date = "20_04_2021"
//! output = "points.csv"
//!
//! [zonal]
//! tiles = ["tile_a.tif", "tile_b.tif"]
//! band_count = 4
//! statistics = ["mean", "max"]
//! max_workers = 8
//! ```

mod extraction;
mod zonal;


pub use extraction::{ExtractionConfig, RasterInput};
pub use zonal::ZonalConfig;

use std::fs;
use std::path::Path;

use log::{debug, info};
use toml::value::Table;
use toml::Value;

use crate::errors::{ProbeError, ProbeResult};

/// Where and how a result table is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: String,
    /// "csv" or "json"
    pub format: String,
}

impl OutputTarget {
    /// Target with the format taken from the file extension (CSV unless `.json`)
    pub fn new(path: &str) -> Self {
        let format = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => "json",
            _ => "csv",
        };
        OutputTarget {
            path: path.to_string(),
            format: format.to_string(),
        }
    }

    pub fn with_format(path: &str, format: &str) -> ProbeResult<Self> {
        let format = format.to_lowercase();
        if format != "csv" && format != "json" {
            return Err(ProbeError::ConfigParse(format!("unsupported output format '{}'", format)));
        }
        Ok(OutputTarget {
            path: path.to_string(),
            format,
        })
    }

    /// Read `output` (and optional `format`) from a section
    fn from_section(section: &Table, name: &str) -> ProbeResult<Option<Self>> {
        let path = match get_str(section, name, "output")? {
            Some(path) => path,
            None => return Ok(None),
        };
        match get_str(section, name, "format")? {
            Some(format) => OutputTarget::with_format(&path, &format).map(Some),
            None => Ok(Some(OutputTarget::new(&path))),
        }
    }
}

/// A complete job: point extraction, zonal statistics, or both
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    pub extraction: Option<ExtractionConfig>,
    pub zonal: Option<ZonalConfig>,
}

impl JobConfig {
    /// Parse a job from TOML text
    pub fn from_str(content: &str) -> ProbeResult<Self> {
        let toml_value: Value = content.parse()
            .map_err(|e| ProbeError::ConfigParse(format!("Failed to parse TOML: {}", e)))?;
        let root = toml_value.as_table()
            .ok_or_else(|| ProbeError::ConfigParse("job file must be a table".to_string()))?;

        for key in root.keys() {
            if key != "extraction" && key != "zonal" {
                return Err(ProbeError::ConfigParse(format!("unknown section [{}]", key)));
            }
        }

        let extraction = match root.get("extraction") {
            Some(value) => Some(ExtractionConfig::from_section(as_section(value, "extraction")?)?),
            None => None,
        };
        let zonal = match root.get("zonal") {
            Some(value) => Some(ZonalConfig::from_section(as_section(value, "zonal")?)?),
            None => None,
        };

        if extraction.is_none() && zonal.is_none() {
            return Err(ProbeError::ConfigParse(
                "job needs an [extraction] or a [zonal] section".to_string()
            ));
        }

        debug!("Parsed job: extraction={}, zonal={}", extraction.is_some(), zonal.is_some());
        Ok(JobConfig { extraction, zonal })
    }

    /// Read and parse a job file
    pub fn from_file(path: &str) -> ProbeResult<Self> {
        info!("Loading job configuration from {}", path);
        let content = fs::read_to_string(path)?;
        JobConfig::from_str(&content)
    }
}

fn as_section<'a>(value: &'a Value, name: &str) -> ProbeResult<&'a Table> {
    value.as_table()
        .ok_or_else(|| ProbeError::ConfigParse(format!("[{}] must be a table", name)))
}

fn type_error(section: &str, key: &str, expected: &str) -> ProbeError {
    ProbeError::ConfigParse(format!("{}.{} must be {}", section, key, expected))
}

fn get_str(table: &Table, section: &str, key: &str) -> ProbeResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(type_error(section, key, "a string")),
    }
}

fn get_f64(table: &Table, section: &str, key: &str) -> ProbeResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(f)) => Ok(Some(*f)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(_) => Err(type_error(section, key, "a number")),
    }
}

fn get_bool(table: &Table, section: &str, key: &str) -> ProbeResult<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(_) => Err(type_error(section, key, "true or false")),
    }
}

fn get_usize(table: &Table, section: &str, key: &str) -> ProbeResult<Option<usize>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Integer(i)) if *i >= 0 => Ok(Some(*i as usize)),
        Some(_) => Err(type_error(section, key, "a non-negative integer")),
    }
}

fn get_str_array(table: &Table, section: &str, key: &str) -> ProbeResult<Option<Vec<String>>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => items.iter()
            .map(|item| item.as_str()
                .map(str::to_string)
                .ok_or_else(|| type_error(section, key, "an array of strings")))
            .collect::<ProbeResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(type_error(section, key, "an array of strings")),
    }
}

fn require<T>(value: Option<T>, section: &str, key: &str) -> ProbeResult<T> {
    value.ok_or_else(|| ProbeError::ConfigParse(format!("{}.{} is required", section, key)))
}

fn reject_unknown_keys(table: &Table, section: &str, known: &[&str]) -> ProbeResult<()> {
    match table.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(ProbeError::ConfigParse(format!("unknown key {}.{}", section, key))),
        None => Ok(()),
    }
}
