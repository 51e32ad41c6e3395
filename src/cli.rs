//! CLI argument parsing for seganalyze

use crate::config::AnalysisConfig;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    Text,
    /// JSON report on stdout
    Json,
    /// Comparison CSV on stdout
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "seganalyze")]
#[command(version)]
#[command(
    about = "Statistical comparison of micro-segmentation experiment results",
    long_about = None
)]
pub struct Cli {
    /// TOML analysis configuration (flags override its values)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Baseline configuration name
    #[arg(short, long, value_name = "NAME")]
    pub baseline: Option<String>,

    /// Treatment configuration, in presentation order (repeatable)
    #[arg(short, long = "treatment", value_name = "NAME")]
    pub treatments: Vec<String>,

    /// Directory searched for attack results (repeatable)
    #[arg(long = "attack-dir", value_name = "DIR")]
    pub attack_dirs: Vec<PathBuf>,

    /// Directory searched for performance results (repeatable)
    #[arg(long = "performance-dir", value_name = "DIR")]
    pub performance_dirs: Vec<PathBuf>,

    /// Directory for comparison.csv, summary_table.csv and report.json
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Confidence level for intervals, in (0, 1)
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<f64>,

    /// Significance level for power and Welch tests, in (0, 1)
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print only; do not write report files
    #[arg(long = "no-write")]
    pub no_write: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then file, then flags
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_toml(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(baseline) = &self.baseline {
            config.baseline = baseline.clone();
            config.treatments.retain(|t| t != baseline);
        }
        if !self.treatments.is_empty() {
            config.treatments = self.treatments.clone();
        }
        if !self.attack_dirs.is_empty() {
            config.attack_dirs = self.attack_dirs.clone();
        }
        if !self.performance_dirs.is_empty() {
            config.performance_dirs = self.performance_dirs.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(confidence) = self.confidence {
            config.confidence_level = confidence;
        }
        if let Some(alpha) = self.alpha {
            config.significance_level = alpha;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["seganalyze"]);
        assert!(cli.config.is_none());
        assert!(cli.treatments.is_empty());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.no_write);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_repeatable_treatments() {
        let cli = Cli::parse_from(["seganalyze", "-t", "nsg", "--treatment", "firewall"]);
        assert_eq!(cli.treatments, vec!["nsg", "firewall"]);
    }

    #[test]
    fn test_cli_repeatable_dirs() {
        let cli = Cli::parse_from([
            "seganalyze",
            "--attack-dir",
            "a1",
            "--attack-dir",
            "a2",
            "--performance-dir",
            "p1",
        ]);
        assert_eq!(cli.attack_dirs, vec![PathBuf::from("a1"), PathBuf::from("a2")]);
        assert_eq!(cli.performance_dirs, vec![PathBuf::from("p1")]);
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["seganalyze", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["seganalyze", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_analysis_config_defaults() {
        let cli = Cli::parse_from(["seganalyze"]);
        assert_eq!(cli.analysis_config().unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "seganalyze",
            "--baseline",
            "config1",
            "--confidence",
            "0.99",
            "--alpha",
            "0.01",
            "--output-dir",
            "out",
        ]);
        let config = cli.analysis_config().unwrap();
        assert_eq!(config.baseline, "config1");
        // New baseline is removed from the default treatment list
        assert_eq!(config.treatments, vec!["config2", "config3"]);
        assert_eq!(config.confidence_level, 0.99);
        assert_eq!(config.significance_level, 0.01);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "baseline = \"flat\"\nconfidence_level = 0.9").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from(["seganalyze", "--config", &path, "--confidence", "0.99"]);
        let config = cli.analysis_config().unwrap();
        assert_eq!(config.baseline, "flat");
        assert_eq!(config.confidence_level, 0.99);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = Cli::parse_from(["seganalyze", "--config", "/nonexistent/seg.toml"]);
        assert!(cli.analysis_config().is_err());
    }
}
