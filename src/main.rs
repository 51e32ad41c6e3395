use anyhow::Result;
use clap::Parser;
use seganalyze::cli::{Cli, OutputFormat};
use seganalyze::config::AnalysisConfig;
use seganalyze::csv_output::CsvComparisonOutput;
use seganalyze::loader::{ATTACK_PATTERN, PERFORMANCE_PATTERN};
use seganalyze::pipeline::{self, AnalysisRun};
use seganalyze::report::AnalysisError;
use seganalyze::text_output;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Explain where result files are expected
fn print_expected_locations(config: &AnalysisConfig) {
    eprintln!("Expected result files:");
    for dir in &config.attack_dirs {
        eprintln!("  {}/*{}*.json", dir.display(), ATTACK_PATTERN);
    }
    for dir in &config.performance_dirs {
        eprintln!("  {}/*{}*.json", dir.display(), PERFORMANCE_PATTERN);
    }
}

fn present(run: &AnalysisRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", text_output::render_report(&run.report));
            print!("{}", text_output::render_significance(&run.report));
        }
        OutputFormat::Json => println!("{}", run.json().to_json()?),
        OutputFormat::Csv => print!("{}", CsvComparisonOutput::new(&run.report).to_csv()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.analysis_config()?;

    let run = match pipeline::run(&config) {
        Ok(run) => run,
        Err(AnalysisError::NoData) => {
            eprintln!("Error: {}", AnalysisError::NoData);
            print_expected_locations(&config);
            std::process::exit(1);
        }
        Err(e) => anyhow::bail!(e),
    };

    eprint!(
        "{}",
        text_output::render_notes(&run.report.diagnostics, &run.skipped)
    );

    present(&run, args.format)?;

    if !args.no_write {
        let written = pipeline::write_artifacts(&run, &config.output_dir)?;
        eprintln!(
            "Wrote {} files to {}",
            written.len(),
            config.output_dir.display()
        );
    }

    Ok(())
}
