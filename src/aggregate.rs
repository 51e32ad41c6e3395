//! Per-configuration aggregation
//!
//! Turns one configuration's attack and performance iteration records into a
//! `MetricAggregate` per metric. Sample-size problems are reported as
//! structured diagnostics instead of being printed, so the caller decides
//! whether to show or suppress them.

use crate::metrics::{IterationRecord, RecordSource};
use crate::stats::{IntervalEstimator, MetricAggregate, SampleSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Below this many iterations a configuration gets a warning
pub const LOW_SAMPLE_WARNING: usize = 3;

/// Below this many iterations a configuration gets an informational note
pub const LOW_SAMPLE_NOTE: usize = 5;

/// Raw iteration records of one configuration, as produced by the loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationInput {
    pub attack: Vec<IterationRecord>,
    pub performance: Vec<IterationRecord>,
}

impl ConfigurationInput {
    /// Add a record from the given experiment
    pub fn push(&mut self, source: RecordSource, record: IterationRecord) {
        match source {
            RecordSource::Attack => self.attack.push(record),
            RecordSource::Performance => self.performance.push(record),
        }
    }

    /// Effective iteration count
    ///
    /// min(attack, performance) when both experiments ran, otherwise the
    /// count of whichever did, otherwise 0.
    pub fn effective_n(&self) -> usize {
        match (self.attack.len(), self.performance.len()) {
            (0, 0) => 0,
            (a, 0) => a,
            (0, p) => p,
            (a, p) => a.min(p),
        }
    }
}

/// Severity of an aggregation diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Advisory message about a configuration's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub configuration: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(configuration: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            configuration: configuration.to_string(),
            message: message.into(),
        }
    }

    pub fn info(configuration: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            configuration: configuration.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            DiagnosticLevel::Info => "note",
            DiagnosticLevel::Warning => "warning",
        };
        write!(f, "{}: {}: {}", tag, self.configuration, self.message)
    }
}

/// Aggregated statistics of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationDataset {
    pub name: String,
    /// Effective iteration count (see `ConfigurationInput::effective_n`)
    pub n: usize,
    pub attack_iterations: usize,
    pub performance_iterations: usize,
    /// Metric name → aggregate
    pub metrics: BTreeMap<String, MetricAggregate>,
    /// Metric name → raw per-iteration samples (kept for effect sizes)
    #[serde(skip)]
    pub samples: BTreeMap<String, SampleSet>,
}

impl ConfigurationDataset {
    pub fn metric(&self, name: &str) -> Option<&MetricAggregate> {
        self.metrics.get(name)
    }

    pub fn samples_for(&self, name: &str) -> Option<&SampleSet> {
        self.samples.get(name)
    }
}

/// Result of aggregating one configuration
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// `None` when the configuration had no usable iterations
    pub dataset: Option<ConfigurationDataset>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a `ConfigurationDataset` from raw iteration records
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationAggregator {
    estimator: IntervalEstimator,
}

impl ConfigurationAggregator {
    pub fn new(confidence: f64) -> Self {
        Self {
            estimator: IntervalEstimator::new(confidence),
        }
    }

    /// Aggregate every metric of one configuration
    ///
    /// A configuration with zero iterations is excluded (warning diagnostic).
    /// Fewer than 3 iterations raises a warning, 3-4 an informational note;
    /// aggregation proceeds either way.
    pub fn aggregate(&self, name: &str, input: &ConfigurationInput) -> Aggregation {
        let n = input.effective_n();
        let mut diagnostics = Vec::new();

        if n == 0 {
            tracing::warn!(
                "Configuration '{}' has no usable iterations, excluding",
                name
            );
            diagnostics.push(Diagnostic::warning(
                name,
                "no usable iterations; excluded from the report",
            ));
            return Aggregation {
                dataset: None,
                diagnostics,
            };
        }

        if n < LOW_SAMPLE_WARNING {
            tracing::warn!("Configuration '{}' has only {} iterations", name, n);
            diagnostics.push(Diagnostic::warning(
                name,
                format!(
                    "only {} iteration(s); confidence intervals and power are unreliable \
                     (need at least {})",
                    n, LOW_SAMPLE_WARNING
                ),
            ));
        } else if n < LOW_SAMPLE_NOTE {
            tracing::info!("Configuration '{}' has {} iterations", name, n);
            diagnostics.push(Diagnostic::info(
                name,
                format!(
                    "{} iterations; {} or more recommended for stable estimates",
                    n, LOW_SAMPLE_NOTE
                ),
            ));
        }

        let mut samples = BTreeMap::new();
        for records in [&input.attack, &input.performance] {
            for (metric, set) in collect_samples(records) {
                samples.insert(metric, set);
            }
        }

        let metrics = samples
            .iter()
            .map(|(metric, set)| (metric.clone(), self.estimator.estimate(set)))
            .collect();

        tracing::debug!(
            "Aggregated '{}': n={}, {} metrics",
            name,
            n,
            samples.len()
        );

        Aggregation {
            dataset: Some(ConfigurationDataset {
                name: name.to_string(),
                n,
                attack_iterations: input.attack.len(),
                performance_iterations: input.performance.len(),
                metrics,
                samples,
            }),
            diagnostics,
        }
    }
}

/// One `SampleSet` per metric across a list of records
///
/// A record that lacks a metric contributes a missing (NaN) value, so the
/// position of every iteration is preserved.
fn collect_samples(records: &[IterationRecord]) -> BTreeMap<String, SampleSet> {
    let names: BTreeSet<&String> = records.iter().flat_map(|r| r.keys()).collect();

    names
        .into_iter()
        .map(|name| {
            let set: SampleSet = records
                .iter()
                .map(|r| r.get(name).copied().unwrap_or(f64::NAN))
                .collect();
            (name.clone(), set)
        })
        .collect()
}
