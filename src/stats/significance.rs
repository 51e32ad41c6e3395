// Welch's two-sample t-test on raw per-iteration samples
//
// Reported alongside effect size and power so a reader can see whether a
// difference is distinguishable from run-to-run noise. No correction for
// multiple comparisons is applied: each (configuration, metric) test stands
// alone.
//
// - Uses aprender's ttest_ind with unequal variances (Welch's variant)
// - Both groups are standardized on the pooled mean and std before the f32
//   narrowing; t, df and p are invariant under that shared transform

use crate::stats::sample::{mean_and_std, SampleSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Outcome of Welch's t-test between baseline and a treatment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// t-statistic
    pub statistic: f64,

    /// Two-tailed p-value
    pub pvalue: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
}

impl WelchTest {
    /// True when the difference is significant at `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.pvalue < alpha
    }
}

/// Run Welch's t-test on the finite values of two sample sets
///
/// # Errors
/// Fails when either group has fewer than 2 finite observations, or when the
/// test itself cannot be evaluated (e.g. both groups constant).
///
/// # Example
/// ```
/// use seganalyze::stats::{welch_test, SampleSet};
///
/// let baseline = SampleSet::new(vec![10.0, 12.0, 11.0, 13.0, 10.0]);
/// let config = SampleSet::new(vec![25.0, 27.0, 26.0, 28.0, 25.0]);
///
/// let test = welch_test(&baseline, &config).unwrap();
/// assert!(test.is_significant(0.05));
/// ```
pub fn welch_test(baseline: &SampleSet, treatment: &SampleSet) -> Result<WelchTest> {
    let base = baseline.finite();
    let treat = treatment.finite();

    if base.len() < 2 || treat.len() < 2 {
        anyhow::bail!(
            "Need at least 2 samples per group for t-test (got {} and {})",
            base.len(),
            treat.len()
        );
    }

    let std_of = |values: &[f64]| mean_and_std(values).map_or(0.0, |(_, std)| std);
    if std_of(&base) == 0.0 && std_of(&treat) == 0.0 {
        anyhow::bail!("Both groups are constant; t-statistic is undefined");
    }

    let pooled: Vec<f64> = base.iter().chain(treat.iter()).copied().collect();
    let Some((center, scale)) = mean_and_std(&pooled).filter(|(_, s)| *s > 0.0) else {
        anyhow::bail!("Pooled standard deviation is zero; t-statistic is undefined");
    };
    let narrow = |values: &[f64]| -> Vec<f32> {
        values.iter().map(|&v| ((v - center) / scale) as f32).collect()
    };
    let a = narrow(&base);
    let b = narrow(&treat);

    let result = aprender::stats::hypothesis::ttest_ind(&a, &b, false)
        .context("Failed to compute Welch t-test")?;

    if !result.pvalue.is_finite() {
        anyhow::bail!("Welch t-test produced a non-finite p-value");
    }

    Ok(WelchTest {
        statistic: f64::from(result.statistic),
        pvalue: f64::from(result.pvalue),
        df: f64::from(result.df),
    })
}
