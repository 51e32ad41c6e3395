//! JSON output for comparison reports
//!
//! Wraps the `ComparisonReport` with format metadata and the list of files
//! that were skipped during loading. Undefined statistics serialize as `null`.

use crate::loader::SkippedFile;
use crate::report::ComparisonReport;
use serde::{Deserialize, Serialize};

/// Input accounting for the run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonInputSummary {
    /// Result files parsed successfully
    pub files_loaded: usize,
    /// Files that could not be read or parsed
    pub skipped: Vec<SkippedFile>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub input: JsonInputSummary,
    #[serde(flatten)]
    pub report: ComparisonReport,
}

impl JsonOutput {
    pub fn new(report: ComparisonReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "seganalyze-json-v1".to_string(),
            input: JsonInputSummary::default(),
            report,
        }
    }

    /// Record what the loader consumed
    pub fn with_input(mut self, files_loaded: usize, skipped: Vec<SkippedFile>) -> Self {
        self.input = JsonInputSummary {
            files_loaded,
            skipped,
        };
        self
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
