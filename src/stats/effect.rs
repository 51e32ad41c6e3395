// Standardized mean difference (Cohen's d) with pooled standard deviation
//
// Computed from raw per-iteration samples, never from aggregated means, so
// the within-sample variance of both groups enters the denominator.

use crate::stats::sample::{mean_and_std, SampleSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cohen's d between two groups
///
/// Returns `None` when either group has fewer than 2 finite observations, or
/// when the pooled standard deviation is exactly zero (a difference between
/// two constant groups cannot be standardized).
///
/// Sign convention: positive when group A has the larger mean.
///
/// # Example
/// ```
/// use seganalyze::stats::{cohens_d, SampleSet};
///
/// let a = SampleSet::new(vec![10.0, 12.0, 11.0, 13.0, 9.0]);
/// let b = SampleSet::new(vec![8.0, 10.0, 9.0, 11.0, 7.0]);
/// let d = cohens_d(&a, &b).unwrap();
/// assert!(d > 0.0);
/// ```
pub fn cohens_d(group_a: &SampleSet, group_b: &SampleSet) -> Option<f64> {
    let a = group_a.finite();
    let b = group_b.finite();

    if a.len() < 2 || b.len() < 2 {
        return None;
    }

    let (mean_a, std_a) = mean_and_std(&a)?;
    let (mean_b, std_b) = mean_and_std(&b)?;

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let pooled_var =
        ((n_a - 1.0) * std_a.powi(2) + (n_b - 1.0) * std_b.powi(2)) / (n_a + n_b - 2.0);
    let pooled_std = pooled_var.sqrt();

    if pooled_std == 0.0 || !pooled_std.is_finite() {
        return None;
    }

    Some((mean_a - mean_b) / pooled_std)
}

/// Qualitative size of an effect (Cohen's conventional benchmarks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSizeClass {
    Negligible,
    Small,
    Medium,
    Large,
    Undefined,
}

impl EffectSizeClass {
    /// Classify by magnitude: |d| < 0.2, < 0.5, < 0.8, otherwise large
    pub fn classify(effect_size: Option<f64>) -> Self {
        let Some(d) = effect_size.filter(|d| !d.is_nan()) else {
            return Self::Undefined;
        };

        let magnitude = d.abs();
        if magnitude < 0.2 {
            Self::Negligible
        } else if magnitude < 0.5 {
            Self::Small
        } else if magnitude < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "Negligible",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for EffectSizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
