//! Multi-temporal raster stacks
//!
//! A `TemporalStack` is a cube of same-shaped slices, each tagged with an
//! acquisition date. Stacks are usually assembled from a series of
//! single-date rasters plus a regular date range.

use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::coordinate::{CoordinateSystem, GeoTransform};
use crate::errors::{ProbeError, ProbeResult};

use super::grid::Grid;
use super::source::{check_band_index, check_same_shape, RasterSource};

lazy_static! {
    // "D", "3D", "W", "2w": an optional multiplier followed by a day or week unit
    static ref FREQUENCY_PATTERN: Regex = Regex::new(r"^(?i)\s*(\d*)\s*([dw])\s*$").unwrap();
}

/// Step between consecutive timestamps of a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency {
    days: u32,
}

impl Frequency {
    /// Frequency of a whole number of days
    pub fn days(days: u32) -> ProbeResult<Self> {
        if days == 0 {
            return Err(ProbeError::Configuration("frequency must be at least one day".to_string()));
        }
        Ok(Frequency { days })
    }

    /// Parse a frequency string such as "D", "16D", "W" or "2W"
    pub fn parse(freq: &str) -> ProbeResult<Self> {
        let captures = FREQUENCY_PATTERN.captures(freq)
            .ok_or_else(|| ProbeError::Configuration(format!("Unsupported frequency '{}'", freq)))?;

        let multiplier = match captures.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
            Some(digits) => digits.parse::<u32>()
                .map_err(|_| ProbeError::Configuration(format!("Invalid frequency multiplier in '{}'", freq)))?,
            None => 1,
        };

        let unit_days = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(unit) if unit == "w" => 7,
            _ => 1,
        };

        Frequency::days(multiplier.saturating_mul(unit_days))
    }

    /// Step length in days
    pub fn step_days(&self) -> u32 {
        self.days
    }
}

/// Regular sequence of dates from `start` to `end`, both inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub frequency: Frequency,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate, frequency: Frequency) -> ProbeResult<Self> {
        if end < start {
            return Err(ProbeError::Configuration(format!(
                "date range ends ({}) before it starts ({})", end, start
            )));
        }
        Ok(DateRange { start, end, frequency })
    }

    /// Parse ISO dates ("2021-04-20") and a frequency string
    pub fn parse(start: &str, end: &str, freq: &str) -> ProbeResult<Self> {
        DateRange::new(parse_iso_date(start)?, parse_iso_date(end)?, Frequency::parse(freq)?)
    }

    /// All timestamps of the range
    pub fn dates(&self) -> Vec<NaiveDate> {
        let step = Duration::days(i64::from(self.frequency.step_days()));
        let mut dates = Vec::new();
        let mut current = self.start;
        while current <= self.end {
            dates.push(current);
            current = match current.checked_add_signed(step) {
                Some(next) => next,
                None => break,
            };
        }
        dates
    }
}

/// Parse a date in ISO form (YYYY-MM-DD)
pub fn parse_iso_date(value: &str) -> ProbeResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ProbeError::Configuration(format!("Invalid date '{}': {}", value, e)))
}

/// One dated layer of a stack
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlice {
    pub date: NaiveDate,
    pub band: Grid,
}

impl TimeSlice {
    pub fn new(date: NaiveDate, band: Grid) -> Self {
        TimeSlice { date, band }
    }

    /// ISO date string used as this slice's column name
    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Time series of same-shaped slices sharing one transform and no-data value
#[derive(Debug, Clone)]
pub struct TemporalStack {
    transform: GeoTransform,
    nodata: f64,
    crs: Option<CoordinateSystem>,
    slices: Vec<TimeSlice>,
    shape: (usize, usize),
}

impl TemporalStack {
    /// Create a stack from already dated slices
    pub fn new(transform: GeoTransform, nodata: f64, slices: Vec<TimeSlice>) -> ProbeResult<Self> {
        let shape = check_same_shape(slices.iter().map(|s| &s.band))?;
        transform.invert()?;

        Ok(TemporalStack {
            transform,
            nodata,
            crs: None,
            slices,
            shape,
        })
    }

    /// Stack one band of each raster along the time axis.
    ///
    /// Timestamps come from `dates`; there must be exactly one per raster,
    /// and all rasters must share transform, no-data value and shape.
    pub fn from_rasters<R: RasterSource>(rasters: &[R], band_index: usize, dates: &DateRange) -> ProbeResult<Self> {
        let timestamps = dates.dates();
        if timestamps.len() != rasters.len() {
            return Err(ProbeError::ShapeMismatch(format!(
                "date range yields {} timestamps for {} rasters", timestamps.len(), rasters.len()
            )));
        }

        let first = rasters.first()
            .ok_or_else(|| ProbeError::ShapeMismatch("no rasters to stack".to_string()))?;
        let transform = *first.transform();
        let nodata = first.nodata();

        let mut slices = Vec::with_capacity(rasters.len());
        for (i, (raster, date)) in rasters.iter().zip(timestamps).enumerate() {
            if raster.transform() != &transform {
                return Err(ProbeError::ShapeMismatch(format!(
                    "raster {} does not share the transform of the first raster", i + 1
                )));
            }
            if !super::source::is_nodata(raster.nodata(), nodata) {
                return Err(ProbeError::ShapeMismatch(format!(
                    "raster {} declares no-data {}, expected {}", i + 1, raster.nodata(), nodata
                )));
            }
            slices.push(TimeSlice::new(date, raster.band(band_index)?.clone()));
        }

        debug!("Stacked {} slices from {} to {}", slices.len(), dates.start, dates.end);

        let stack = TemporalStack::new(transform, nodata, slices)?;
        Ok(match first.crs() {
            Some(crs) => stack.with_crs(crs),
            None => stack,
        })
    }

    /// Attach a coordinate system
    pub fn with_crs(mut self, crs: CoordinateSystem) -> Self {
        self.crs = Some(crs);
        self
    }

    /// Slices in time order of construction
    pub fn slices(&self) -> &[TimeSlice] {
        &self.slices
    }
}

impl RasterSource for TemporalStack {
    fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    fn nodata(&self) -> f64 {
        self.nodata
    }

    fn crs(&self) -> Option<CoordinateSystem> {
        self.crs
    }

    fn band_count(&self) -> usize {
        self.slices.len()
    }

    fn band(&self, band_index: usize) -> ProbeResult<&Grid> {
        let i = check_band_index(band_index, self.slices.len())?;
        Ok(&self.slices[i].band)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape
    }

    fn band_date(&self, band_index: usize) -> Option<NaiveDate> {
        let i = check_band_index(band_index, self.slices.len()).ok()?;
        Some(self.slices[i].date)
    }
}
