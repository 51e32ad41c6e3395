//! Result file discovery and parsing
//!
//! Reads attack-simulation and performance-test JSON files into flat
//! per-iteration metric records grouped by configuration name. A file that
//! cannot be read or parsed is skipped and logged; it never aborts the batch.

use crate::aggregate::ConfigurationInput;
use crate::metrics::{self, IterationRecord, RecordSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name fragment identifying attack result files
pub const ATTACK_PATTERN: &str = "attack-results";

/// File name fragment identifying performance result files
pub const PERFORMANCE_PATTERN: &str = "performance";

/// Errors for a single result file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// A result file that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything the loader found
#[derive(Debug, Clone, Default)]
pub struct LoadedResults {
    /// Configuration name → iteration records
    pub configurations: BTreeMap<String, ConfigurationInput>,
    pub skipped: Vec<SkippedFile>,
    pub files_loaded: usize,
}

impl LoadedResults {
    /// True when no file produced a record
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

/// Attack JSON key → flat metric name
const ATTACK_FIELDS: &[(&str, &str)] = &[
    ("LateralMovementSuccessRate", metrics::OVERALL_SUCCESS_RATE),
    ("RDPSuccessRate", metrics::RDP_SUCCESS_RATE),
    ("SMBSuccessRate", metrics::SMB_SUCCESS_RATE),
    ("TotalLateralMovementAttempts", metrics::TOTAL_ATTEMPTS),
    ("SuccessfulLateralMovements", metrics::SUCCESSFUL_MOVEMENTS),
];

/// Performance JSON pointer → flat metric name
const PERFORMANCE_FIELDS: &[(&str, &str)] = &[
    ("/NetworkLatency/Statistics/Average", metrics::LATENCY_AVG),
    ("/NetworkLatency/Statistics/Minimum", metrics::LATENCY_MIN),
    ("/NetworkLatency/Statistics/Maximum", metrics::LATENCY_MAX),
    ("/NetworkLatency/Statistics/P95", metrics::LATENCY_P95),
    ("/NetworkLatency/Statistics/P99", metrics::LATENCY_P99),
    ("/TCPThroughput/AverageThroughputMbps", metrics::THROUGHPUT),
    (
        "/AuthenticationOverhead/Statistics/Average",
        metrics::AUTH_OVERHEAD,
    ),
    ("/ResourceUtilization/AverageCPU", metrics::CPU_USAGE),
    ("/ResourceUtilization/AverageMemory", metrics::MEMORY_USAGE),
];

/// Parse one result document into (configuration name, record)
///
/// Absent or non-numeric metrics become NaN (missing), never 0.
///
/// # Errors
/// Invalid JSON, or a document without `Configuration` or without its
/// `Metrics`/`Tests` section.
pub fn parse_record(
    source: RecordSource,
    content: &str,
) -> Result<(String, IterationRecord), LoadError> {
    // PowerShell's UTF-8 output carries a byte-order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let doc: Value = serde_json::from_str(content)?;

    let config = doc
        .get("Configuration")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(LoadError::MissingField("Configuration"))?;

    let record: IterationRecord = match source {
        RecordSource::Attack => {
            let section = doc
                .get("Metrics")
                .filter(|v| v.is_object())
                .ok_or(LoadError::MissingField("Metrics"))?;
            ATTACK_FIELDS
                .iter()
                .map(|(key, name)| (name.to_string(), numeric(section.get(*key))))
                .collect()
        }
        RecordSource::Performance => {
            let section = doc
                .get("Tests")
                .filter(|v| v.is_object())
                .ok_or(LoadError::MissingField("Tests"))?;
            PERFORMANCE_FIELDS
                .iter()
                .map(|(pointer, name)| (name.to_string(), numeric(section.pointer(pointer))))
                .collect()
        }
    };

    Ok((config.to_string(), record))
}

/// Numeric value of a JSON node (numbers or numeric strings), NaN otherwise
fn numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Read and parse one result file
pub fn load_file(
    source: RecordSource,
    path: &Path,
) -> Result<(String, IterationRecord), LoadError> {
    let content = fs::read_to_string(path)?;
    parse_record(source, &content)
}

/// JSON files in `dirs` whose name contains `pattern`, sorted, deduplicated
///
/// Missing or unreadable directories are skipped.
pub fn find_result_files(dirs: &[PathBuf], pattern: &str) -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut files = Vec::new();

    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::debug!("Skipping missing directory {}", dir.display());
            continue;
        };

        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_result_file(path, pattern))
            .collect();
        found.sort();

        if !found.is_empty() {
            tracing::info!("Found {} files in {}", found.len(), dir.display());
        }

        for path in found {
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                files.push(path);
            }
        }
    }

    files
}

fn is_result_file(path: &Path, pattern: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.contains(pattern)
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Discovers and loads result files from configured directories
#[derive(Debug, Clone)]
pub struct ResultLoader {
    attack_dirs: Vec<PathBuf>,
    performance_dirs: Vec<PathBuf>,
}

impl ResultLoader {
    pub fn new(attack_dirs: Vec<PathBuf>, performance_dirs: Vec<PathBuf>) -> Self {
        Self {
            attack_dirs,
            performance_dirs,
        }
    }

    /// Load every attack and performance file
    pub fn load(&self) -> LoadedResults {
        let mut results = LoadedResults::default();

        let sources = [
            (RecordSource::Attack, &self.attack_dirs, ATTACK_PATTERN),
            (
                RecordSource::Performance,
                &self.performance_dirs,
                PERFORMANCE_PATTERN,
            ),
        ];

        for (source, dirs, pattern) in sources {
            for path in find_result_files(dirs, pattern) {
                match load_file(source, &path) {
                    Ok((config, record)) => {
                        tracing::debug!(
                            "Loaded {:?} record for '{}' from {}",
                            source,
                            config,
                            path.display()
                        );
                        results
                            .configurations
                            .entry(config)
                            .or_default()
                            .push(source, record);
                        results.files_loaded += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                        results.skipped.push(SkippedFile {
                            path,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        results
    }
}
