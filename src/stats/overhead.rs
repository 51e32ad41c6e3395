// Baseline-relative overhead with per-metric sign conventions
//
// Positive overhead always means "worse than baseline": higher latency for
// latency-like metrics, lower throughput for throughput-like metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default validity floor for higher-is-better metrics
///
/// A throughput below this is a failed collection run, not a measurement.
pub const DEFAULT_VALIDITY_FLOOR: f64 = 0.1;

/// Direction in which a metric improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// Latency, attack success, resource usage
    HigherIsWorse,
    /// Throughput
    HigherIsBetter,
    /// Counts without a preferred direction
    Neutral,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HigherIsWorse => "higher-is-worse",
            Self::HigherIsBetter => "higher-is-better",
            Self::Neutral => "neutral",
        })
    }
}

/// Signed percentage deviation of a configuration from the baseline
///
/// # Example
/// ```
/// use seganalyze::stats::{OverheadCalculator, Polarity};
///
/// let calc = OverheadCalculator::default();
/// assert_eq!(calc.overhead(10.0, 12.0, Polarity::HigherIsWorse), Some(20.0));
/// assert_eq!(calc.overhead(100.0, 80.0, Polarity::HigherIsBetter), Some(20.0));
/// assert_eq!(calc.overhead(100.0, 0.0, Polarity::HigherIsBetter), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverheadCalculator {
    validity_floor: f64,
}

impl Default for OverheadCalculator {
    fn default() -> Self {
        Self {
            validity_floor: DEFAULT_VALIDITY_FLOOR,
        }
    }
}

impl OverheadCalculator {
    pub fn new(validity_floor: f64) -> Self {
        Self { validity_floor }
    }

    pub fn validity_floor(&self) -> f64 {
        self.validity_floor
    }

    /// Overhead percentage, or `None` when it cannot be computed
    ///
    /// Undefined when either value is missing, the baseline is zero, the
    /// configuration value is exactly zero, or a higher-is-better value falls
    /// below the validity floor.
    pub fn overhead(&self, baseline: f64, value: f64, polarity: Polarity) -> Option<f64> {
        if !baseline.is_finite() || !value.is_finite() || baseline == 0.0 {
            return None;
        }

        // Zero means the collection failed, not that the metric vanished
        if value == 0.0 {
            return None;
        }

        if polarity == Polarity::HigherIsBetter && value < self.validity_floor {
            return None;
        }

        let pct = match polarity {
            Polarity::HigherIsBetter => (baseline - value) / baseline * 100.0,
            Polarity::HigherIsWorse | Polarity::Neutral => (value - baseline) / baseline * 100.0,
        };

        Some(pct)
    }

    /// Overhead on optional means (`None` in either position propagates)
    pub fn overhead_of(
        &self,
        baseline: Option<f64>,
        value: Option<f64>,
        polarity: Polarity,
    ) -> Option<f64> {
        self.overhead(baseline?, value?, polarity)
    }
}
