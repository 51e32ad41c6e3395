// Raw per-iteration observations for one metric of one configuration
//
// Missing collections arrive as NaN (or infinities from broken exporters).
// Every estimator works on the finite subset only, so the effective sample
// size is the finite count, not the input length.

use serde::{Deserialize, Serialize};

/// Ordered collection of raw observations for one metric
///
/// # Example
/// ```
/// use seganalyze::stats::SampleSet;
///
/// let samples = SampleSet::new(vec![10.0, f64::NAN, 12.0]);
/// assert_eq!(samples.len(), 3);
/// assert_eq!(samples.effective_n(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    values: Vec<f64>,
}

impl SampleSet {
    /// Create a sample set from raw values (non-finite values are kept as missing)
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Raw values in insertion order, missing entries included
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of raw entries, missing included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Finite observations only
    pub fn finite(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }

    /// Count of finite observations
    pub fn effective_n(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }
}

impl From<Vec<f64>> for SampleSet {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for SampleSet {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

impl FromIterator<f64> for SampleSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Arithmetic mean and Bessel-corrected standard deviation of finite values
///
/// Returns `None` for an empty slice. A single value yields a standard
/// deviation of zero.
pub(crate) fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    if values.len() == 1 {
        return Some((mean, 0.0));
    }

    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let std = (sum_sq / (n - 1.0)).sqrt();

    Some((mean, std))
}
