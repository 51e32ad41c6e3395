// End-to-end tests for the seganalyze binary

mod utils;

use predicates::prelude::*;
use std::fs;
use utils::ResultsDir;

fn seganalyze(results: &ResultsDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("seganalyze");
    cmd.arg("--attack-dir")
        .arg(results.attack_dir())
        .arg("--performance-dir")
        .arg(results.performance_dir())
        .arg("--output-dir")
        .arg(results.output_dir());
    cmd
}

#[test]
fn test_text_report() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .arg("--no-write")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== baseline (baseline) (n=5) ==="))
        .stdout(predicate::str::contains("=== config1 (n=5) ==="))
        .stdout(predicate::str::contains("Avg Latency"))
        .stdout(predicate::str::contains("self"));
}

#[test]
fn test_baseline_listed_before_treatments() {
    let results = ResultsDir::new();
    results.standard_campaign();

    let output = seganalyze(&results).arg("--no-write").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    let base = stdout.find("=== baseline").unwrap();
    let cfg = stdout.find("=== config1").unwrap();
    assert!(base < cfg);
}

#[test]
fn test_json_report() {
    let results = ResultsDir::new();
    results.standard_campaign();

    let output = seganalyze(&results)
        .arg("--no-write")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["format"], "seganalyze-json-v1");
    assert_eq!(value["baseline_present"], true);
    assert_eq!(value["input"]["files_loaded"], 20);
    assert_eq!(value["configurations"][0]["name"], "baseline");
    assert_eq!(value["configurations"][1]["name"], "config1");

    // Baseline effect size is undefined → null
    let base_metric = &value["configurations"][0]["metrics"][0];
    assert!(base_metric["effect_size"].is_null());
}

#[test]
fn test_csv_report() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .arg("--no-write")
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("configuration,metric,polarity,n,mean"))
        .stdout(predicate::str::contains("config1,Throughput_Mbps,higher-is-better,5,"));
}

#[test]
fn test_artifacts_written() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 files"));

    let out = results.output_dir();
    assert!(out.join("comparison.csv").exists());
    assert!(out.join("report.json").exists());

    let summary = fs::read_to_string(out.join("summary_table.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Configuration,"));
    assert!(lines[1].starts_with("baseline,82.00,"));
}

#[test]
fn test_no_data_exits_nonzero_with_locations() {
    let results = ResultsDir::new();

    seganalyze(&results)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable data"))
        .stderr(predicate::str::contains("attack-results"))
        .stderr(predicate::str::contains("performance"));

    assert!(!results.output_dir().exists());
}

#[test]
fn test_malformed_file_skipped() {
    let results = ResultsDir::new();
    results.standard_campaign();
    results.write_raw_attack("attack-results-broken.json", "{ not json");

    seganalyze(&results)
        .arg("--no-write")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped:"))
        .stderr(predicate::str::contains("attack-results-broken.json"));
}

#[test]
fn test_low_sample_warning() {
    let results = ResultsDir::new();
    results.standard_campaign();
    results.write_attack("config3", 0, 50.0);
    results.write_performance("config3", 0, 2.0, 800.0);

    seganalyze(&results)
        .arg("--no-write")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: config3"))
        .stdout(predicate::str::contains("=== config3 (n=1) ==="));
}

#[test]
fn test_missing_baseline_still_reports() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .arg("--no-write")
        .arg("--baseline")
        .arg("flat")
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline 'flat' not found"));
}

#[test]
fn test_invalid_confidence_rejected() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .arg("--no-write")
        .arg("--confidence")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("confidence_level"));
}

#[test]
fn test_repeated_treatment_rejected() {
    let results = ResultsDir::new();
    results.standard_campaign();

    seganalyze(&results)
        .arg("--no-write")
        .args(["-t", "config1", "-t", "config1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("listed more than once"));
}

#[test]
fn test_config_file() {
    let results = ResultsDir::new();
    results.standard_campaign();

    let config_path = results.root.path().join("analysis.toml");
    fs::write(
        &config_path,
        "baseline = \"config1\"\ntreatments = [\"baseline\"]\n",
    )
    .unwrap();

    let output = seganalyze(&results)
        .arg("--no-write")
        .arg("--config")
        .arg(&config_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let config1 = stdout.find("=== config1 (baseline)").unwrap();
    let baseline = stdout.find("=== baseline (n=5)").unwrap();
    assert!(config1 < baseline);
}
