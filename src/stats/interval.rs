// Confidence intervals for a metric mean using Student's t-distribution
//
// Small experiment campaigns (3-10 iterations per configuration) are the
// norm, so the normal approximation is never used: the critical value comes
// from t with n-1 degrees of freedom.
//
// - Uses statrs StudentsT for the (1+confidence)/2 quantile
// - Range and median stay in f64 so reported values match the inputs exactly

use crate::stats::sample::{mean_and_std, SampleSet};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Default two-sided confidence level
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Point estimate and confidence interval for one (configuration, metric) pair
///
/// Every statistic is optional: `None` means "cannot be computed", which is
/// different from a computed zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricAggregate {
    pub mean: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub margin: Option<f64>,
    /// Sample standard deviation (Bessel-corrected)
    pub std_dev: Option<f64>,
    /// Effective sample size (finite observations)
    pub n: usize,
    /// Observed range and median
    pub spread: Option<Spread>,
}

impl MetricAggregate {
    /// True when a confidence interval could be computed (n >= 2)
    pub fn has_interval(&self) -> bool {
        self.margin.is_some()
    }
}

/// Observed range of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Two-sided t-based interval estimator
///
/// # Example
/// ```
/// use seganalyze::stats::{IntervalEstimator, SampleSet};
///
/// let samples = SampleSet::new(vec![10.0, 12.0, 11.0, 13.0, 9.0]);
/// let aggregate = IntervalEstimator::default().estimate(&samples);
///
/// assert_eq!(aggregate.mean, Some(11.0));
/// assert!((aggregate.margin.unwrap() - 1.963).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalEstimator {
    confidence: f64,
}

impl Default for IntervalEstimator {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl IntervalEstimator {
    /// Create an estimator for the given confidence level in (0, 1)
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Estimate mean, standard deviation and confidence interval
    ///
    /// Never fails: degenerate inputs produce `None` fields.
    /// - n = 0: everything `None`
    /// - n = 1: mean is the value, std is 0, no interval
    /// - n >= 2: full interval
    pub fn estimate(&self, samples: &SampleSet) -> MetricAggregate {
        let finite = samples.finite();
        let n = finite.len();

        let Some((mean, std)) = mean_and_std(&finite) else {
            return MetricAggregate::default();
        };

        let spread = compute_spread(&finite);

        if n == 1 {
            return MetricAggregate {
                mean: Some(mean),
                std_dev: Some(0.0),
                n,
                spread,
                ..MetricAggregate::default()
            };
        }

        let margin = t_critical(self.confidence, (n - 1) as f64)
            .map(|t| t * std / (n as f64).sqrt());

        MetricAggregate {
            mean: Some(mean),
            lower: margin.map(|m| mean - m),
            upper: margin.map(|m| mean + m),
            margin,
            std_dev: Some(std),
            n,
            spread,
        }
    }
}

/// Two-sided critical value t_{(1+confidence)/2, df}
///
/// Returns `None` for non-positive degrees of freedom or a confidence level
/// outside (0, 1).
pub fn t_critical(confidence: f64, df: f64) -> Option<f64> {
    if !(confidence > 0.0 && confidence < 1.0) || !(df > 0.0) {
        return None;
    }

    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let t = dist.inverse_cdf((1.0 + confidence) / 2.0);

    t.is_finite().then_some(t)
}

/// Min, max and median of finite values
fn compute_spread(finite: &[f64]) -> Option<Spread> {
    if finite.is_empty() {
        return None;
    }

    let mut sorted = finite.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    Some(Spread {
        min: sorted[0],
        max: sorted[n - 1],
        median,
    })
}
