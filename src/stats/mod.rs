// Statistical aggregation engine
//
// Converts raw per-iteration samples into defensible comparisons:
// - Confidence intervals from Student's t (small-sample correct)
// - Cohen's d from raw samples with pooled standard deviation
// - Analytic power of the two-sample, two-sided t-test
// - Baseline-relative overhead with per-metric polarity
//
// Every statistic that cannot be computed (too few samples, zero variance,
// zero baseline) is `None`. Zero always means "computed as zero".
//
// Scientific Foundation:
// - Cohen, J. (1988). Statistical Power Analysis for the Behavioral Sciences.
//   Effect size benchmarks 0.2 / 0.5 / 0.8.
// - Lenth, R. V. (1989). Algorithm AS 243. Noncentral t CDF for power.

mod effect;
mod interval;
mod overhead;
mod power;
mod sample;
mod significance;

pub use effect::{cohens_d, EffectSizeClass};
pub use interval::{t_critical, IntervalEstimator, MetricAggregate, Spread, DEFAULT_CONFIDENCE};
pub use overhead::{OverheadCalculator, Polarity, DEFAULT_VALIDITY_FLOOR};
pub use power::{noncentral_t_cdf, statistical_power, PowerClass, DEFAULT_ALPHA};
pub use sample::SampleSet;
pub use significance::{welch_test, WelchTest};
