//! Zonal statistics and ordered statistic sets

use std::fmt;
use std::str::FromStr;

use crate::errors::{ProbeError, ProbeResult};

/// Aggregate computed over the cells of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonalStatistic {
    Mean,
    Min,
    Max,
    Sum,
    Count,
    /// Population standard deviation
    Std,
    Median,
    Range,
}

impl ZonalStatistic {
    pub fn name(&self) -> &'static str {
        match self {
            ZonalStatistic::Mean => "mean",
            ZonalStatistic::Min => "min",
            ZonalStatistic::Max => "max",
            ZonalStatistic::Sum => "sum",
            ZonalStatistic::Count => "count",
            ZonalStatistic::Std => "std",
            ZonalStatistic::Median => "median",
            ZonalStatistic::Range => "range",
        }
    }

    /// Reduce the valid cell values of one zone.
    ///
    /// Zones without valid cells give NaN, except `Count`, which gives 0.
    pub fn compute(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return match self {
                ZonalStatistic::Count => 0.0,
                _ => f64::NAN,
            };
        }

        let n = values.len() as f64;
        match self {
            ZonalStatistic::Mean => values.iter().sum::<f64>() / n,
            ZonalStatistic::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            ZonalStatistic::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ZonalStatistic::Sum => values.iter().sum(),
            ZonalStatistic::Count => n,
            ZonalStatistic::Std => {
                let mean = values.iter().sum::<f64>() / n;
                let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
                variance.sqrt()
            }
            ZonalStatistic::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            ZonalStatistic::Range => {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                max - min
            }
        }
    }
}

impl FromStr for ZonalStatistic {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(ZonalStatistic::Mean),
            "min" => Ok(ZonalStatistic::Min),
            "max" => Ok(ZonalStatistic::Max),
            "sum" => Ok(ZonalStatistic::Sum),
            "count" => Ok(ZonalStatistic::Count),
            "std" => Ok(ZonalStatistic::Std),
            "median" => Ok(ZonalStatistic::Median),
            "range" => Ok(ZonalStatistic::Range),
            _ => Err(ProbeError::UnsupportedStatistic(s.to_string())),
        }
    }
}

impl fmt::Display for ZonalStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-empty, ordered, duplicate-free list of statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticSet {
    statistics: Vec<ZonalStatistic>,
}

impl StatisticSet {
    /// Build a set, keeping the first occurrence of each statistic
    pub fn new(statistics: Vec<ZonalStatistic>) -> ProbeResult<Self> {
        let mut unique: Vec<ZonalStatistic> = Vec::with_capacity(statistics.len());
        for stat in statistics {
            if !unique.contains(&stat) {
                unique.push(stat);
            }
        }
        if unique.is_empty() {
            return Err(ProbeError::Configuration("at least one statistic is required".to_string()));
        }
        Ok(StatisticSet { statistics: unique })
    }

    /// Parse statistic names; any unknown name fails the whole set
    pub fn parse<S: AsRef<str>>(names: &[S]) -> ProbeResult<Self> {
        let statistics = names.iter()
            .map(|n| n.as_ref().parse::<ZonalStatistic>())
            .collect::<ProbeResult<Vec<_>>>()?;
        StatisticSet::new(statistics)
    }

    pub fn iter(&self) -> impl Iterator<Item = ZonalStatistic> + '_ {
        self.statistics.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }
}
