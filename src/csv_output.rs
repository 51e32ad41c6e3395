//! CSV output for comparison reports
//!
//! Two tables: the full per-metric comparison (`comparison.csv`) and the
//! per-configuration summary of key metric means (`summary_table.csv`).
//! Undefined values are written as empty cells.

use crate::metrics;
use crate::report::{ComparisonReport, ConfigurationReport, MetricComparison};

const COMPARISON_HEADER: &[&str] = &[
    "configuration",
    "metric",
    "polarity",
    "n",
    "mean",
    "ci_lower",
    "ci_upper",
    "margin",
    "std_dev",
    "delta",
    "delta_pct",
    "effect_size",
    "effect_class",
    "power",
    "power_class",
    "overhead_pct",
    "p_value",
];

/// Escape CSV field (handle commas, quotes, newlines)
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn rounded(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

fn row(fields: Vec<String>) -> String {
    let mut line = fields.join(",");
    line.push('\n');
    line
}

/// Per-metric comparison table, one row per (configuration, metric)
#[derive(Debug)]
pub struct CsvComparisonOutput<'a> {
    report: &'a ComparisonReport,
}

impl<'a> CsvComparisonOutput<'a> {
    pub fn new(report: &'a ComparisonReport) -> Self {
        Self { report }
    }

    fn header(&self) -> String {
        COMPARISON_HEADER.join(",")
    }

    fn format_metric(&self, config: &ConfigurationReport, m: &MetricComparison) -> String {
        let effect_class = if config.is_baseline {
            "self".to_string()
        } else {
            m.effect_class.to_string()
        };

        row(vec![
            escape_field(&config.name),
            escape_field(&m.metric),
            m.polarity.to_string(),
            m.aggregate.n.to_string(),
            cell(m.aggregate.mean),
            cell(m.aggregate.lower),
            cell(m.aggregate.upper),
            cell(m.aggregate.margin),
            cell(m.aggregate.std_dev),
            cell(m.delta),
            cell(m.delta_pct),
            cell(m.effect_size),
            effect_class,
            cell(m.power),
            m.power_class.to_string(),
            cell(m.overhead_pct),
            cell(m.p_value),
        ])
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = self.header();
        output.push('\n');

        for config in &self.report.configurations {
            for m in &config.metrics {
                output.push_str(&self.format_metric(config, m));
            }
        }

        output
    }
}

/// Summary table: key metric means per configuration, rounded to 2 decimals
#[derive(Debug)]
pub struct CsvSummaryOutput<'a> {
    report: &'a ComparisonReport,
}

impl<'a> CsvSummaryOutput<'a> {
    pub fn new(report: &'a ComparisonReport) -> Self {
        Self { report }
    }

    fn header(&self) -> String {
        let mut headers = vec!["Configuration".to_string()];
        for name in metrics::SUMMARY_METRICS {
            let column = match metrics::lookup(name) {
                Some(spec) if !spec.unit.is_empty() => format!("{} ({})", spec.label, spec.unit),
                Some(spec) => spec.label.to_string(),
                None => name.to_string(),
            };
            headers.push(escape_field(&column));
        }
        headers.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = self.header();
        output.push('\n');

        for config in &self.report.configurations {
            let mut fields = vec![escape_field(&config.name)];
            fields.extend(
                metrics::SUMMARY_METRICS
                    .iter()
                    .map(|name| rounded(config.metric(name).and_then(|m| m.aggregate.mean))),
            );
            output.push_str(&row(fields));
        }

        output
    }
}
