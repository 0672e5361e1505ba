//! `[zonal]` section

use std::thread;

use toml::value::Table;
use toml::Value;

use crate::errors::{ProbeError, ProbeResult};
use crate::zonal::{StatisticSet, TileRef, TileZonalRunner};

use super::{get_bool, get_str_array, get_usize, reject_unknown_keys, require, OutputTarget};

const SECTION: &str = "zonal";

const KNOWN_KEYS: &[&str] = &[
    "tiles", "band_count", "statistics", "max_workers", "progress", "output", "format",
];

/// Validated settings of a zonal statistics run
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalConfig {
    pub tiles: Vec<TileRef>,
    pub band_count: usize,
    pub statistics: StatisticSet,
    pub max_workers: usize,
    pub progress: bool,
    pub output: Option<OutputTarget>,
}

impl ZonalConfig {
    pub(super) fn from_section(section: &Table) -> ProbeResult<Self> {
        reject_unknown_keys(section, SECTION, KNOWN_KEYS)?;

        let tiles = parse_tiles(section)?;

        let band_count = require(get_usize(section, SECTION, "band_count")?, SECTION, "band_count")?;
        if band_count == 0 {
            return Err(ProbeError::ConfigParse("zonal.band_count must be at least 1".to_string()));
        }

        let names = get_str_array(section, SECTION, "statistics")?
            .unwrap_or_else(|| vec!["mean".to_string()]);
        let statistics = StatisticSet::parse(&names)?;

        let max_workers = match get_usize(section, SECTION, "max_workers")? {
            Some(0) => return Err(ProbeError::ConfigParse("zonal.max_workers must be at least 1".to_string())),
            Some(n) => n,
            None => default_workers(),
        };

        Ok(ZonalConfig {
            tiles,
            band_count,
            statistics,
            max_workers,
            progress: get_bool(section, SECTION, "progress")?.unwrap_or(false),
            output: OutputTarget::from_section(section, SECTION)?,
        })
    }

    /// A runner for these settings
    pub fn runner(&self) -> ProbeResult<TileZonalRunner> {
        Ok(TileZonalRunner::new(self.band_count, self.statistics.clone(), self.max_workers)?
            .with_progress(self.progress))
    }
}

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Tiles are given as paths, or as `{ path = "...", label = "..." }` tables
fn parse_tiles(section: &Table) -> ProbeResult<Vec<TileRef>> {
    let items = match section.get("tiles") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ProbeError::ConfigParse("zonal.tiles must be an array".to_string())),
        None => return Err(ProbeError::ConfigParse("zonal.tiles is required".to_string())),
    };

    let tiles = items.iter()
        .map(|item| match item {
            Value::String(path) => Ok(TileRef::new(path)),
            Value::Table(table) => {
                let path = table.get("path").and_then(Value::as_str)
                    .ok_or_else(|| ProbeError::ConfigParse("zonal tile entry needs a path".to_string()))?;
                Ok(match table.get("label").and_then(Value::as_str) {
                    Some(label) => TileRef::with_label(path, label),
                    None => TileRef::new(path),
                })
            }
            _ => Err(ProbeError::ConfigParse("zonal.tiles entries must be paths or tables".to_string())),
        })
        .collect::<ProbeResult<Vec<_>>>()?;

    let mut labels: Vec<&str> = tiles.iter().map(|t| t.label.as_str()).collect();
    labels.sort_unstable();
    if let Some(pair) = labels.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ProbeError::ConfigParse(format!(
            "two tiles share the label '{}'; give one an explicit label", pair[0]
        )));
    }

    Ok(tiles)
}
