//! Statistics available for point extraction

use std::fmt;
use std::str::FromStr;

use crate::errors::ProbeError;

/// Aggregate computed over a point's sampling window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Statistic {
    /// Arithmetic mean of the window
    #[default]
    Mean,
}

impl Statistic {
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
        }
    }

    /// Apply the statistic to the values of a window.
    ///
    /// Returns NaN when there are no values.
    pub fn apply(&self, values: impl Iterator<Item = f64>) -> f64 {
        match self {
            Statistic::Mean => {
                let (sum, count) = values.fold((0.0f64, 0usize), |(s, n), v| (s + v, n + 1));
                if count == 0 {
                    f64::NAN
                } else {
                    sum / count as f64
                }
            }
        }
    }
}

impl FromStr for Statistic {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Statistic::Mean),
            _ => Err(ProbeError::UnsupportedStatistic(s.to_string())),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
