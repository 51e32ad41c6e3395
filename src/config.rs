// Configuration for a comparison run
//
// The engine never reads globals: baseline name, confidence level and
// significance level are passed explicitly through this struct. Values can
// come from a TOML file and be overridden on the command line.

use crate::stats::{DEFAULT_ALPHA, DEFAULT_CONFIDENCE, DEFAULT_VALIDITY_FLOOR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters for aggregation and comparison
///
/// # Example
/// ```
/// use seganalyze::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.baseline, "baseline");
/// assert_eq!(config.confidence_level, 0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the reference configuration
    pub baseline: String,

    /// Treatment configurations in presentation order
    ///
    /// Configurations found on disk but not listed here are reported after
    /// the declared ones, in lexical order.
    pub treatments: Vec<String>,

    /// Two-sided confidence level for intervals
    ///
    /// - 0.95 (default)
    /// - 0.99: wider intervals
    pub confidence_level: f64,

    /// Significance level (alpha) for power and Welch tests
    pub significance_level: f64,

    /// Higher-is-better values below this are failed collections
    pub throughput_floor: f64,

    /// Directories searched for `*attack-results*.json`
    pub attack_dirs: Vec<PathBuf>,

    /// Directories searched for `*performance*.json`
    pub performance_dirs: Vec<PathBuf>,

    /// Where CSV and JSON artifacts are written
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baseline: "baseline".to_string(),
            treatments: vec![
                "config1".to_string(),
                "config2".to_string(),
                "config3".to_string(),
            ],
            confidence_level: DEFAULT_CONFIDENCE,
            significance_level: DEFAULT_ALPHA,
            throughput_floor: DEFAULT_VALIDITY_FLOOR,
            attack_dirs: vec![
                PathBuf::from("./AttackResults"),
                PathBuf::from("./ResearchData"),
            ],
            performance_dirs: vec![
                PathBuf::from("./PerformanceResults"),
                PathBuf::from("./ResearchData"),
            ],
            output_dir: PathBuf::from("./analysis-output"),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file (missing keys take defaults)
    ///
    /// # Example TOML
    /// ```toml
    /// baseline = "flat"
    /// treatments = ["nsg", "asg", "firewall"]
    /// confidence_level = 0.99
    /// attack_dirs = ["./data/attacks"]
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read analysis config: {}", path.as_ref().display())
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse TOML analysis config")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.baseline.trim().is_empty() {
            return Err("baseline name must not be empty".to_string());
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            ));
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.throughput_floor.is_nan() || self.throughput_floor < 0.0 {
            return Err(format!(
                "throughput_floor must be non-negative, got {}",
                self.throughput_floor
            ));
        }

        let mut seen = BTreeSet::new();
        if let Some(dup) = self.treatments.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(format!("treatment '{}' is listed more than once", dup));
        }

        if self.treatments.iter().any(|t| t == &self.baseline) {
            return Err(format!(
                "baseline '{}' must not also be listed as a treatment",
                self.baseline
            ));
        }

        Ok(())
    }

    /// Canonical presentation order: baseline, then declared treatments
    pub fn declared_order(&self) -> Vec<&str> {
        std::iter::once(self.baseline.as_str())
            .chain(self.treatments.iter().map(String::as_str))
            .collect()
    }
}
