//! Cross-configuration comparison report
//!
//! Compares every treatment configuration against the baseline, metric by
//! metric: delta, standardized effect size from raw samples, power, overhead
//! and a Welch significance test. Configurations are always emitted in the
//! canonical order (baseline first, then declared treatments) regardless of
//! the order in which result files were discovered.

use crate::aggregate::{ConfigurationDataset, Diagnostic};
use crate::config::AnalysisConfig;
use crate::metrics;
use crate::stats::{
    cohens_d, statistical_power, welch_test, EffectSizeClass, MetricAggregate,
    OverheadCalculator, Polarity, PowerClass, SampleSet,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors that abort a whole analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No usable data found for any configuration")]
    NoData,

    #[error("Invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// Comparison of one metric of one configuration against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: String,
    pub polarity: Polarity,
    pub aggregate: MetricAggregate,
    /// configuration mean − baseline mean
    pub delta: Option<f64>,
    pub delta_pct: Option<f64>,
    /// Cohen's d (baseline − configuration) / pooled std
    pub effect_size: Option<f64>,
    pub effect_class: EffectSizeClass,
    pub power: Option<f64>,
    pub power_class: PowerClass,
    pub overhead_pct: Option<f64>,
    /// Welch two-sided p-value
    pub p_value: Option<f64>,
}

impl MetricComparison {
    /// Self statistics only (no baseline to compare against)
    fn standalone(metric: &str, aggregate: &MetricAggregate) -> Self {
        Self {
            metric: metric.to_string(),
            polarity: metrics::polarity_of(metric),
            aggregate: aggregate.clone(),
            delta: None,
            delta_pct: None,
            effect_size: None,
            effect_class: EffectSizeClass::Undefined,
            power: None,
            power_class: PowerClass::Undefined,
            overhead_pct: None,
            p_value: None,
        }
    }
}

/// All metric comparisons of one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationReport {
    pub name: String,
    pub is_baseline: bool,
    pub n: usize,
    /// Ordered by the metric catalog, unknown metrics last
    pub metrics: Vec<MetricComparison>,
}

impl ConfigurationReport {
    pub fn metric(&self, name: &str) -> Option<&MetricComparison> {
        self.metrics.iter().find(|m| m.metric == name)
    }
}

/// Full comparison output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub baseline: String,
    pub baseline_present: bool,
    pub confidence_level: f64,
    pub significance_level: f64,
    /// Canonical order: baseline first, then treatments
    pub configurations: Vec<ConfigurationReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ComparisonReport {
    pub fn configuration(&self, name: &str) -> Option<&ConfigurationReport> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Names in presentation order
    pub fn names(&self) -> Vec<&str> {
        self.configurations.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Builds a `ComparisonReport` from aggregated datasets
#[derive(Debug, Clone)]
pub struct ComparisonReportBuilder<'a> {
    config: &'a AnalysisConfig,
    overhead: OverheadCalculator,
}

impl<'a> ComparisonReportBuilder<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            overhead: OverheadCalculator::new(config.throughput_floor),
        }
    }

    /// Compare every dataset against the baseline
    ///
    /// A missing baseline is not an error: every configuration is reported
    /// with its own statistics and undefined comparison fields.
    ///
    /// # Errors
    /// `AnalysisError::NoData` when `datasets` is empty.
    pub fn build(
        &self,
        datasets: &BTreeMap<String, ConfigurationDataset>,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<ComparisonReport, AnalysisError> {
        if datasets.is_empty() {
            return Err(AnalysisError::NoData);
        }

        let baseline = datasets.get(&self.config.baseline);
        if baseline.is_none() {
            tracing::warn!(
                "Baseline '{}' not found; reporting self statistics only",
                self.config.baseline
            );
        }

        let configurations = canonical_order(self.config, datasets.keys())
            .into_iter()
            .filter_map(|name| datasets.get(name))
            .map(|dataset| self.configuration_report(dataset, baseline))
            .collect();

        Ok(ComparisonReport {
            baseline: self.config.baseline.clone(),
            baseline_present: baseline.is_some(),
            confidence_level: self.config.confidence_level,
            significance_level: self.config.significance_level,
            configurations,
            diagnostics,
        })
    }

    fn configuration_report(
        &self,
        dataset: &ConfigurationDataset,
        baseline: Option<&ConfigurationDataset>,
    ) -> ConfigurationReport {
        let is_baseline = dataset.name == self.config.baseline;

        let metrics = metrics::sort_for_display(dataset.metrics.keys().map(String::as_str))
            .into_iter()
            .filter_map(|metric| {
                let aggregate = dataset.metric(metric)?;
                let comparison = match baseline {
                    Some(_) if is_baseline => self.identity(metric, aggregate),
                    Some(base) => match base.metric(metric) {
                        Some(_) => self.compare(metric, base, dataset),
                        None => MetricComparison::standalone(metric, aggregate),
                    },
                    None => MetricComparison::standalone(metric, aggregate),
                };
                Some(comparison)
            })
            .collect();

        ConfigurationReport {
            name: dataset.name.clone(),
            is_baseline,
            n: dataset.n,
            metrics,
        }
    }

    /// The baseline's own row: zero deltas, effect size undefined ("self")
    fn identity(&self, metric: &str, aggregate: &MetricAggregate) -> MetricComparison {
        let polarity = metrics::polarity_of(metric);
        let zero = aggregate.mean.map(|_| 0.0);

        MetricComparison {
            delta: zero,
            delta_pct: aggregate.mean.filter(|m| *m != 0.0).map(|_| 0.0),
            overhead_pct: self.overhead.overhead_of(aggregate.mean, aggregate.mean, polarity),
            ..MetricComparison::standalone(metric, aggregate)
        }
    }

    fn compare(
        &self,
        metric: &str,
        baseline: &ConfigurationDataset,
        config: &ConfigurationDataset,
    ) -> MetricComparison {
        let polarity = metrics::polarity_of(metric);
        let empty = SampleSet::default();

        let base_agg = baseline.metric(metric).cloned().unwrap_or_default();
        let cfg_agg = config.metric(metric).cloned().unwrap_or_default();
        let base_samples = baseline.samples_for(metric).unwrap_or(&empty);
        let cfg_samples = config.samples_for(metric).unwrap_or(&empty);

        let delta = match (cfg_agg.mean, base_agg.mean) {
            (Some(c), Some(b)) => Some(c - b),
            _ => None,
        };
        let delta_pct = match (delta, base_agg.mean) {
            (Some(d), Some(b)) if b != 0.0 => Some(d / b * 100.0),
            _ => None,
        };

        // Same observations the effect size was estimated from
        let effect_size = cohens_d(base_samples, cfg_samples);
        let power_n = base_samples.effective_n().min(cfg_samples.effective_n());
        let power = statistical_power(effect_size, power_n, self.config.significance_level);
        let overhead_pct = self.overhead.overhead_of(base_agg.mean, cfg_agg.mean, polarity);

        let p_value = match welch_test(base_samples, cfg_samples) {
            Ok(test) => Some(test.pvalue),
            Err(e) => {
                tracing::debug!("No Welch test for {}/{}: {}", config.name, metric, e);
                None
            }
        };

        MetricComparison {
            metric: metric.to_string(),
            polarity,
            aggregate: cfg_agg,
            delta,
            delta_pct,
            effect_size,
            effect_class: EffectSizeClass::classify(effect_size),
            power,
            power_class: PowerClass::classify(power),
            overhead_pct,
            p_value,
        }
    }
}

/// Presentation order for configuration names
///
/// Baseline, then declared treatments, then any undeclared configuration in
/// lexical order. Names absent from `present` are dropped.
pub fn canonical_order<'n, I>(config: &AnalysisConfig, present: I) -> Vec<&'n str>
where
    I: IntoIterator<Item = &'n String>,
{
    let mut present: Vec<&str> = present.into_iter().map(String::as_str).collect();
    present.sort_unstable();
    present.dedup();

    let mut declared = config.declared_order();
    let mut seen = BTreeSet::new();
    declared.retain(|name| seen.insert(*name));

    let mut ordered: Vec<&str> = declared
        .iter()
        .filter_map(|name| present.iter().copied().find(|p| p == name))
        .collect();

    for name in present {
        if !declared.iter().any(|d| *d == name) {
            tracing::debug!("Configuration '{}' is not declared, appending", name);
            ordered.push(name);
        }
    }

    ordered
}
