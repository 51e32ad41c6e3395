//! Aggregation and comparison benchmarks
//!
//! Covers the three hot spots of an analysis run:
//!
//! 1. Interval estimation per (configuration, metric)
//! 2. Analytic power (noncentral t CDF series)
//! 3. A full aggregate → compare pass over a synthetic campaign
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench aggregation
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seganalyze::config::AnalysisConfig;
use seganalyze::loader::LoadedResults;
use seganalyze::metrics::{IterationRecord, RecordSource, CATALOG};
use seganalyze::pipeline;
use seganalyze::stats::{statistical_power, IntervalEstimator, SampleSet};

/// Synthetic campaign: every catalog metric, `iterations` per configuration
fn campaign(configurations: usize, iterations: usize) -> LoadedResults {
    let mut loaded = LoadedResults::default();

    for c in 0..configurations {
        let name = if c == 0 {
            "baseline".to_string()
        } else {
            format!("config{}", c)
        };
        let input = loaded.configurations.entry(name).or_default();

        for i in 0..iterations {
            for source in [RecordSource::Attack, RecordSource::Performance] {
                let record: IterationRecord = CATALOG
                    .iter()
                    .filter(|m| m.source == source)
                    .enumerate()
                    .map(|(k, m)| {
                        let value = 10.0 * (k + 1) as f64 + c as f64 + (i % 7) as f64 * 0.3;
                        (m.name.to_string(), value)
                    })
                    .collect();
                input.push(source, record);
            }
        }
    }

    loaded
}

fn bench_interval_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_estimate");
    let estimator = IntervalEstimator::default();

    for n in [5, 30, 1000] {
        let samples = SampleSet::new((0..n).map(|i| 1.5 + (i % 11) as f64 * 0.01).collect());
        group.bench_with_input(BenchmarkId::from_parameter(n), &samples, |b, samples| {
            b.iter(|| black_box(estimator.estimate(black_box(samples))));
        });
    }

    group.finish();
}

fn bench_statistical_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistical_power");

    for d in [0.2, 0.8, 3.0] {
        group.bench_with_input(BenchmarkId::from_parameter(d), &d, |b, &d| {
            b.iter(|| black_box(statistical_power(black_box(Some(d)), 10, 0.05)));
        });
    }

    group.finish();
}

/// Full engine pass for a 4-configuration, 10-iteration campaign
fn bench_analyze_campaign(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let loaded = campaign(4, 10);

    c.bench_function("analyze_campaign_4x10", |b| {
        b.iter(|| black_box(pipeline::analyze(&config, black_box(&loaded))));
    });
}

criterion_group!(
    benches,
    bench_interval_estimate,
    bench_statistical_power,
    bench_analyze_campaign
);
criterion_main!(benches);
