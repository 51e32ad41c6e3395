//! End-to-end analysis: load → aggregate → compare → write
//!
//! Each stage is a pure function of the previous stage's output, so the
//! engine can be driven from files or from in-memory records alike.

use crate::aggregate::ConfigurationAggregator;
use crate::config::AnalysisConfig;
use crate::csv_output::{CsvComparisonOutput, CsvSummaryOutput};
use crate::json_output::JsonOutput;
use crate::loader::{LoadedResults, ResultLoader, SkippedFile};
use crate::report::{AnalysisError, ComparisonReport, ComparisonReportBuilder};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPARISON_CSV: &str = "comparison.csv";
pub const SUMMARY_CSV: &str = "summary_table.csv";
pub const REPORT_JSON: &str = "report.json";

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub report: ComparisonReport,
    pub files_loaded: usize,
    pub skipped: Vec<SkippedFile>,
}

impl AnalysisRun {
    pub fn json(&self) -> JsonOutput {
        JsonOutput::new(self.report.clone()).with_input(self.files_loaded, self.skipped.clone())
    }
}

/// Aggregate and compare already-loaded records
///
/// # Errors
/// `InvalidConfig` when the configuration fails validation, `NoData` when no
/// configuration has a usable iteration.
pub fn analyze(
    config: &AnalysisConfig,
    loaded: &LoadedResults,
) -> Result<ComparisonReport, AnalysisError> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;

    let aggregator = ConfigurationAggregator::new(config.confidence_level);
    let mut datasets = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for (name, input) in &loaded.configurations {
        let aggregation = aggregator.aggregate(name, input);
        diagnostics.extend(aggregation.diagnostics);
        if let Some(dataset) = aggregation.dataset {
            datasets.insert(name.clone(), dataset);
        }
    }

    tracing::info!(
        "Aggregated {} of {} configurations",
        datasets.len(),
        loaded.configurations.len()
    );

    ComparisonReportBuilder::new(config).build(&datasets, diagnostics)
}

/// Load result files from the configured directories and analyze them
pub fn run(config: &AnalysisConfig) -> Result<AnalysisRun, AnalysisError> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;

    let loaded =
        ResultLoader::new(config.attack_dirs.clone(), config.performance_dirs.clone()).load();
    tracing::info!(
        "Loaded {} files ({} skipped) for {} configurations",
        loaded.files_loaded,
        loaded.skipped.len(),
        loaded.configurations.len()
    );

    let report = analyze(config, &loaded)?;

    Ok(AnalysisRun {
        report,
        files_loaded: loaded.files_loaded,
        skipped: loaded.skipped,
    })
}

/// Write comparison.csv, summary_table.csv and report.json into `dir`
pub fn write_artifacts(run: &AnalysisRun, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| {
        format!("Failed to create output directory: {}", dir.display())
    })?;

    let artifacts = [
        (COMPARISON_CSV, CsvComparisonOutput::new(&run.report).to_csv()),
        (SUMMARY_CSV, CsvSummaryOutput::new(&run.report).to_csv()),
        (REPORT_JSON, run.json().to_json()?),
    ];

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, content) in artifacts {
        let path = dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}
