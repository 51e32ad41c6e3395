//! Human-readable report tables
//!
//! One table per configuration in canonical order. Undefined values print as
//! `n/a`; the baseline's own effect-size column prints as `self`.

use crate::aggregate::Diagnostic;
use crate::loader::SkippedFile;
use crate::metrics;
use crate::report::{ComparisonReport, ConfigurationReport, MetricComparison};
use std::fmt::Write;

const NA: &str = "n/a";
const RULE: &str = concat!(
    "------------------------ ------------------------ ----- --------- ",
    "-------------------- ------------------ ---------"
);

fn signed_pct(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("{:+.1}%", v))
}

fn mean_with_margin(m: &MetricComparison) -> String {
    match (m.aggregate.mean, m.aggregate.margin) {
        (Some(mean), Some(margin)) => format!("{:.2} ± {:.2}", mean, margin),
        (Some(mean), None) => format!("{:.2}", mean),
        _ => NA.to_string(),
    }
}

fn effect_cell(config: &ConfigurationReport, m: &MetricComparison) -> String {
    if config.is_baseline {
        return "self".to_string();
    }
    match m.effect_size {
        Some(d) => format!("{:+.2} ({})", d, m.effect_class),
        None => NA.to_string(),
    }
}

fn power_cell(m: &MetricComparison) -> String {
    match m.power {
        Some(p) => format!("{:.2} ({})", p, m.power_class),
        None => NA.to_string(),
    }
}

fn write_configuration(out: &mut String, config: &ConfigurationReport, confidence: f64) {
    let title = if config.is_baseline {
        format!("{} (baseline)", config.name)
    } else {
        config.name.clone()
    };
    let _ = writeln!(out, "=== {} (n={}) ===", title, config.n);
    let _ = writeln!(
        out,
        "{:<24} {:>24} {:>5} {:>9} {:>20} {:>18} {:>9}",
        "metric",
        format!("mean ± {:.0}% CI", confidence * 100.0),
        "n",
        "delta",
        "effect size",
        "power",
        "overhead"
    );
    let _ = writeln!(out, "{}", RULE);

    for m in &config.metrics {
        let _ = writeln!(
            out,
            "{:<24} {:>24} {:>5} {:>9} {:>20} {:>18} {:>9}",
            metrics::label_of(&m.metric),
            mean_with_margin(m),
            m.aggregate.n,
            signed_pct(m.delta_pct),
            effect_cell(config, m),
            power_cell(m),
            signed_pct(m.overhead_pct),
        );
    }
    out.push('\n');
}

/// Render the full report as text
pub fn render_report(report: &ComparisonReport) -> String {
    let mut out = String::new();

    if !report.baseline_present {
        let _ = writeln!(
            out,
            "Baseline '{}' not found: showing per-configuration statistics only\n",
            report.baseline
        );
    }

    for config in &report.configurations {
        write_configuration(&mut out, config, report.confidence_level);
    }

    out
}

/// Render diagnostics and skipped files (for stderr)
pub fn render_notes(diagnostics: &[Diagnostic], skipped: &[SkippedFile]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let _ = writeln!(out, "{}", d);
    }
    for s in skipped {
        let _ = writeln!(out, "skipped: {}: {}", s.path.display(), s.reason);
    }
    out
}

/// Configurations with metrics that differ significantly from the baseline (Welch)
pub fn render_significance(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let alpha = report.significance_level;

    for config in report.configurations.iter().filter(|c| !c.is_baseline) {
        let significant: Vec<&str> = config
            .metrics
            .iter()
            .filter(|m| m.p_value.is_some_and(|p| p < alpha))
            .map(|m| metrics::label_of(&m.metric))
            .collect();

        if !significant.is_empty() {
            let _ = writeln!(
                out,
                "{}: significant at alpha={} (Welch): {}",
                config.name,
                alpha,
                significant.join(", ")
            );
        }
    }

    out
}
