// Integration test utilities
//
// Writes result files in the layout produced by the experiment scripts.

#![allow(dead_code)]

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary experiment workspace with attack and performance directories
pub struct ResultsDir {
    pub root: TempDir,
}

impl ResultsDir {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("AttackResults")).unwrap();
        fs::create_dir_all(root.path().join("PerformanceResults")).unwrap();
        Self { root }
    }

    pub fn attack_dir(&self) -> PathBuf {
        self.root.path().join("AttackResults")
    }

    pub fn performance_dir(&self) -> PathBuf {
        self.root.path().join("PerformanceResults")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("analysis-output")
    }

    pub fn write_attack(&self, config: &str, iteration: usize, success_rate: f64) {
        let doc = json!({
            "Configuration": config,
            "Iteration": iteration,
            "Metrics": {
                "LateralMovementSuccessRate": success_rate,
                "RDPSuccessRate": success_rate,
                "SMBSuccessRate": success_rate / 2.0,
                "TotalLateralMovementAttempts": 10,
                "SuccessfulLateralMovements": (success_rate / 10.0).round()
            }
        });
        write(
            &self.attack_dir(),
            &format!("attack-results-{}-{}.json", config, iteration),
            &doc.to_string(),
        );
    }

    pub fn write_performance(&self, config: &str, iteration: usize, latency: f64, throughput: f64) {
        let doc = json!({
            "Configuration": config,
            "Iteration": iteration,
            "Tests": {
                "NetworkLatency": {
                    "Statistics": {
                        "Average": latency,
                        "Minimum": latency * 0.8,
                        "Maximum": latency * 1.5,
                        "P95": latency * 1.3,
                        "P99": latency * 1.4
                    }
                },
                "TCPThroughput": { "AverageThroughputMbps": throughput },
                "AuthenticationOverhead": { "Statistics": { "Average": 12.0 } },
                "ResourceUtilization": { "AverageCPU": 15.0, "AverageMemory": 40.0 }
            }
        });
        write(
            &self.performance_dir(),
            &format!("performance-{}-{}.json", config, iteration),
            &doc.to_string(),
        );
    }

    pub fn write_raw_attack(&self, name: &str, content: &str) {
        write(&self.attack_dir(), name, content);
    }

    /// Five iterations each for a baseline and one treatment
    pub fn standard_campaign(&self) {
        for i in 0..5 {
            let jitter = i as f64 * 0.02;
            self.write_attack("baseline", i, 80.0 + i as f64);
            self.write_performance("baseline", i, 1.50 + jitter, 940.0 - i as f64);
            self.write_attack("config1", i, 10.0 + i as f64);
            self.write_performance("config1", i, 1.80 + jitter, 900.0 - i as f64);
        }
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
