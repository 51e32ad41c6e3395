//! Metric catalog for segmentation experiments
//!
//! Maps flat metric names produced by the loader to their display label,
//! unit, source and polarity. Unknown metrics are treated as neutral.

use crate::stats::Polarity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which experiment produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Lateral-movement attack simulation
    Attack,
    /// Network performance test
    Performance,
}

/// One iteration's flat metric record
pub type IterationRecord = BTreeMap<String, f64>;

/// Static description of a known metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub source: RecordSource,
    pub polarity: Polarity,
}

pub const OVERALL_SUCCESS_RATE: &str = "Overall_Success_Rate";
pub const RDP_SUCCESS_RATE: &str = "RDP_Success_Rate";
pub const SMB_SUCCESS_RATE: &str = "SMB_Success_Rate";
pub const TOTAL_ATTEMPTS: &str = "Total_Attempts";
pub const SUCCESSFUL_MOVEMENTS: &str = "Successful_Movements";
pub const LATENCY_AVG: &str = "Latency_Avg_ms";
pub const LATENCY_MIN: &str = "Latency_Min_ms";
pub const LATENCY_MAX: &str = "Latency_Max_ms";
pub const LATENCY_P95: &str = "Latency_P95_ms";
pub const LATENCY_P99: &str = "Latency_P99_ms";
pub const THROUGHPUT: &str = "Throughput_Mbps";
pub const AUTH_OVERHEAD: &str = "Auth_Overhead_ms";
pub const CPU_USAGE: &str = "CPU_Usage_Percent";
pub const MEMORY_USAGE: &str = "Memory_Usage_Percent";

const fn spec(
    name: &'static str,
    label: &'static str,
    unit: &'static str,
    source: RecordSource,
    polarity: Polarity,
) -> MetricSpec {
    MetricSpec {
        name,
        label,
        unit,
        source,
        polarity,
    }
}

/// All known metrics in presentation order
pub const CATALOG: &[MetricSpec] = &[
    spec(
        OVERALL_SUCCESS_RATE,
        "Overall Success",
        "%",
        RecordSource::Attack,
        Polarity::HigherIsWorse,
    ),
    spec(
        RDP_SUCCESS_RATE,
        "RDP Success",
        "%",
        RecordSource::Attack,
        Polarity::HigherIsWorse,
    ),
    spec(
        SMB_SUCCESS_RATE,
        "SMB Success",
        "%",
        RecordSource::Attack,
        Polarity::HigherIsWorse,
    ),
    spec(
        TOTAL_ATTEMPTS,
        "Total Attempts",
        "",
        RecordSource::Attack,
        Polarity::Neutral,
    ),
    spec(
        SUCCESSFUL_MOVEMENTS,
        "Successful Movements",
        "",
        RecordSource::Attack,
        Polarity::HigherIsWorse,
    ),
    spec(
        LATENCY_AVG,
        "Avg Latency",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        LATENCY_MIN,
        "Min Latency",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        LATENCY_MAX,
        "Max Latency",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        LATENCY_P95,
        "P95 Latency",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        LATENCY_P99,
        "P99 Latency",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        THROUGHPUT,
        "Throughput",
        "Mbps",
        RecordSource::Performance,
        Polarity::HigherIsBetter,
    ),
    spec(
        AUTH_OVERHEAD,
        "Auth Overhead",
        "ms",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        CPU_USAGE,
        "CPU Usage",
        "%",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
    spec(
        MEMORY_USAGE,
        "Memory Usage",
        "%",
        RecordSource::Performance,
        Polarity::HigherIsWorse,
    ),
];

/// Columns of the per-configuration summary table
pub const SUMMARY_METRICS: &[&str] = &[
    OVERALL_SUCCESS_RATE,
    RDP_SUCCESS_RATE,
    SMB_SUCCESS_RATE,
    LATENCY_AVG,
    LATENCY_P95,
    THROUGHPUT,
    CPU_USAGE,
];

/// Look up a known metric
pub fn lookup(name: &str) -> Option<&'static MetricSpec> {
    CATALOG.iter().find(|m| m.name == name)
}

/// Polarity of a metric (neutral when unknown)
pub fn polarity_of(name: &str) -> Polarity {
    lookup(name).map_or(Polarity::Neutral, |m| m.polarity)
}

/// Display label of a metric (the raw name when unknown)
pub fn label_of(name: &str) -> &str {
    lookup(name).map_or(name, |m| m.label)
}

/// Presentation rank: catalog order first, unknown metrics after
pub fn display_rank(name: &str) -> usize {
    CATALOG
        .iter()
        .position(|m| m.name == name)
        .unwrap_or(CATALOG.len())
}

/// Sort metric names by catalog order, then lexically
pub fn sort_for_display<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_by(|a, b| display_rank(a).cmp(&display_rank(b)).then_with(|| a.cmp(b)));
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarities() {
        assert_eq!(polarity_of(LATENCY_AVG), Polarity::HigherIsWorse);
        assert_eq!(polarity_of(THROUGHPUT), Polarity::HigherIsBetter);
        assert_eq!(polarity_of(OVERALL_SUCCESS_RATE), Polarity::HigherIsWorse);
        assert_eq!(polarity_of(TOTAL_ATTEMPTS), Polarity::Neutral);
        assert_eq!(polarity_of("Packet_Loss_Ratio"), Polarity::Neutral);
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<_> = CATALOG.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_summary_metrics_are_known() {
        for name in SUMMARY_METRICS {
            assert!(lookup(name).is_some(), "{name} missing from catalog");
        }
    }

    #[test]
    fn test_label_falls_back_to_name() {
        assert_eq!(label_of(THROUGHPUT), "Throughput");
        assert_eq!(label_of("Custom_Metric"), "Custom_Metric");
    }

    #[test]
    fn test_sort_for_display() {
        let sorted = sort_for_display(["zzz", THROUGHPUT, OVERALL_SUCCESS_RATE, "aaa"]);
        assert_eq!(sorted, vec![OVERALL_SUCCESS_RATE, THROUGHPUT, "aaa", "zzz"]);
    }
}
