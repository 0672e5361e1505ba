//! `[extraction]` section

use toml::value::Table;

use crate::errors::{ProbeError, ProbeResult};
use crate::extractor::{AggregationMode, ExtractionParams, ExtractionSession, OutputMode, Statistic};
use crate::raster::DateRange;

use super::{get_bool, get_f64, get_str, get_str_array, get_usize, reject_unknown_keys, require, OutputTarget};

const SECTION: &str = "extraction";

const KNOWN_KEYS: &[&str] = &[
    "raster", "rasters", "band", "start", "end", "frequency",
    "buffer_size", "masked", "nodata", "statistic", "mode", "date",
    "output", "format",
];

/// Raster(s) a point extraction reads
#[derive(Debug, Clone, PartialEq)]
pub enum RasterInput {
    /// One raster, every band sampled
    Single(String),
    /// One band of several rasters, stacked in time order
    Stack {
        paths: Vec<String>,
        band_index: usize,
        dates: DateRange,
    },
}

/// Validated settings of a point extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    pub input: RasterInput,
    pub params: ExtractionParams,
    pub output_mode: OutputMode,
    pub output: Option<OutputTarget>,
}

impl ExtractionConfig {
    pub(super) fn from_section(section: &Table) -> ProbeResult<Self> {
        reject_unknown_keys(section, SECTION, KNOWN_KEYS)?;

        let input = parse_input(section)?;

        let buffer_size = require(get_f64(section, SECTION, "buffer_size")?, SECTION, "buffer_size")?;
        let masked = get_bool(section, SECTION, "masked")?.unwrap_or(false);
        let mut params = ExtractionParams::new(buffer_size, AggregationMode::from_masked(masked));
        if let Some(nodata) = get_f64(section, SECTION, "nodata")? {
            params = params.with_nodata(nodata);
        }
        if let Some(name) = get_str(section, SECTION, "statistic")? {
            params = params.with_statistic(name.parse::<Statistic>()?);
        }

        // Rejects negative buffers now rather than at run time
        ExtractionSession::new(params.clone())?;

        let output_mode = parse_output_mode(section, &input)?;
        let output = OutputTarget::from_section(section, SECTION)?;

        Ok(ExtractionConfig {
            input,
            params,
            output_mode,
            output,
        })
    }

    /// A session for these parameters
    pub fn session(&self) -> ProbeResult<ExtractionSession> {
        ExtractionSession::new(self.params.clone())
    }
}

fn parse_input(section: &Table) -> ProbeResult<RasterInput> {
    let single = get_str(section, SECTION, "raster")?;
    let many = get_str_array(section, SECTION, "rasters")?;

    match (single, many) {
        (Some(path), None) => Ok(RasterInput::Single(path)),
        (None, Some(paths)) => {
            if paths.is_empty() {
                return Err(ProbeError::ConfigParse("extraction.rasters is empty".to_string()));
            }
            let band_index = get_usize(section, SECTION, "band")?.unwrap_or(1);
            if band_index == 0 {
                return Err(ProbeError::ConfigParse("extraction.band is 1-based".to_string()));
            }
            let start = require(get_str(section, SECTION, "start")?, SECTION, "start")?;
            let end = require(get_str(section, SECTION, "end")?, SECTION, "end")?;
            let frequency = require(get_str(section, SECTION, "frequency")?, SECTION, "frequency")?;
            let dates = DateRange::parse(&start, &end, &frequency)?;

            let date_count = dates.dates().len();
            if date_count != paths.len() {
                return Err(ProbeError::ConfigParse(format!(
                    "{} to {} every {} day(s) gives {} dates for {} rasters",
                    start, end, dates.frequency.step_days(), date_count, paths.len()
                )));
            }

            Ok(RasterInput::Stack { paths, band_index, dates })
        }
        (Some(_), Some(_)) => Err(ProbeError::ConfigParse(
            "extraction.raster and extraction.rasters are mutually exclusive".to_string()
        )),
        (None, None) => Err(ProbeError::ConfigParse(
            "extraction needs a raster or a list of rasters".to_string()
        )),
    }
}

fn parse_output_mode(section: &Table, input: &RasterInput) -> ProbeResult<OutputMode> {
    let default_mode = match input {
        RasterInput::Single(_) => "bands",
        RasterInput::Stack { .. } => "temporal",
    };
    let mode = get_str(section, SECTION, "mode")?.unwrap_or_else(|| default_mode.to_string());
    let date = get_str(section, SECTION, "date")?;

    match (mode.to_lowercase().as_str(), input) {
        ("bands", RasterInput::Single(_)) => {
            let date = require(date, SECTION, "date")?;
            Ok(OutputMode::MultiBand { date })
        }
        ("bands", RasterInput::Stack { .. }) => Err(ProbeError::ConfigParse(
            "a raster stack can only be extracted in temporal mode".to_string()
        )),
        ("temporal", _) => {
            if date.is_some() {
                return Err(ProbeError::ConfigParse(
                    "extraction.date does not apply to temporal mode; columns are named by slice date".to_string()
                ));
            }
            Ok(OutputMode::MultiTemporal)
        }
        (other, _) => Err(ProbeError::ConfigParse(format!(
            "extraction.mode must be \"bands\" or \"temporal\", got \"{}\"", other
        ))),
    }
}
