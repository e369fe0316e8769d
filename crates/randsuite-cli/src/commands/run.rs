use std::path::Path;
use std::time::Instant;

use log::info;
use randsuite_core::{ConfigurationError, Report, SuiteConfig, TestSuite};
use serde::Serialize;
use thiserror::Error;

use crate::generators::make_source;

/// Options of the `run` subcommand.
pub struct RunCommandConfig<'a> {
    pub generator: &'a str,
    pub seed: Option<u64>,
    pub value: f64,
    pub samples: Option<usize>,
    pub config_path: Option<&'a str>,
    pub tests: Option<&'a str>,
    pub summaries: Option<&'a str>,
    pub normalization: Option<&'a str>,
    pub bins: Option<usize>,
    pub parallel: bool,
    pub output_path: Option<&'a str>,
    pub threshold: f64,
}

/// Failures of the `run` subcommand. Both exit with status 2.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error("failed to write report to {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Machine-readable output of one run.
#[derive(Serialize)]
struct RunDocument<'a> {
    run_id: String,
    generator: &'a str,
    samples: usize,
    threshold: f64,
    passed: bool,
    elapsed_secs: f64,
    reports: &'a [Report],
}

/// Build, run, print. Returns whether every gating score met the threshold.
///
/// A report that cannot be written fails the command even when the scores
/// pass.
pub fn run(cfg: RunCommandConfig<'_>) -> Result<bool, RunError> {
    let config = resolve_config(&cfg)?;
    let mut source =
        make_source(cfg.generator, cfg.seed, cfg.value).map_err(ConfigurationError::Invalid)?;

    println!(
        "🔬 Drawing {} values from '{}'...\n",
        config.samples, cfg.generator
    );
    let t0 = Instant::now();
    let suite = TestSuite::from_config(&mut source, &config)?;
    info!("sample drawn in {:.2}s", t0.elapsed().as_secs_f64());

    let reports = if cfg.parallel {
        suite.run_parallel()
    } else {
        suite.run()
    };
    let elapsed = t0.elapsed().as_secs_f64();
    let passed = gate(&reports, cfg.threshold);

    print_table(&reports);
    println!(
        "\n{} (threshold {:.2}, {:.1}s)",
        if passed { "✓ PASS" } else { "✗ FAIL" },
        cfg.threshold,
        elapsed
    );

    if let Some(path) = cfg.output_path {
        let document = RunDocument {
            run_id: uuid::Uuid::new_v4().to_string(),
            generator: cfg.generator,
            samples: config.samples,
            threshold: cfg.threshold,
            passed,
            elapsed_secs: elapsed,
            reports: &reports,
        };
        write_document(Path::new(path), &document).map_err(|source| RunError::Output {
            path: path.to_string(),
            source,
        })?;
        info!("wrote {} reports to {path}", reports.len());
        println!("\n📄 Report saved to: {path}");
    }

    Ok(passed)
}

/// File configuration (or defaults) with command-line overrides applied.
pub fn resolve_config(cfg: &RunCommandConfig<'_>) -> Result<SuiteConfig, ConfigurationError> {
    let mut config = match cfg.config_path {
        Some(path) => SuiteConfig::load(Path::new(path))?,
        None => SuiteConfig::default(),
    };
    if let Some(samples) = cfg.samples {
        config.samples = samples;
    }
    if let Some(tests) = cfg.tests {
        config.tests = Some(super::parse_list(tests));
    }
    if let Some(summaries) = cfg.summaries {
        config.summaries = Some(super::parse_list(summaries));
    }
    if let Some(normalization) = cfg.normalization {
        config.normalization = super::parse_normalization(normalization);
    }
    if cfg.bins.is_some() {
        config.bins = cfg.bins;
    }
    config.validate()?;
    Ok(config)
}

/// Summaries gate the run; with no summaries registered, every test does.
pub fn gate(reports: &[Report], threshold: f64) -> bool {
    let summaries: Vec<&Report> = reports.iter().filter(|r| r.is_summary()).collect();
    let gating: Vec<&Report> = if summaries.is_empty() {
        reports.iter().collect()
    } else {
        summaries
    };
    !gating.is_empty() && gating.iter().all(|r| r.is_random_probability >= threshold)
}

fn print_table(reports: &[Report]) {
    println!("{}", "=".repeat(72));
    println!(
        "{:<20} {:>8} {:>6}  {}",
        "Test", "Score", "Grade", "Details"
    );
    println!("{}", "-".repeat(72));
    for report in reports {
        if report.is_summary() {
            println!("{}", "-".repeat(72));
        }
        println!(
            "  {:<18} {:>8.4} {:>6}  {}",
            report.name,
            report.is_random_probability,
            report.grade(),
            details(report)
        );
    }
}

fn details(report: &Report) -> String {
    report
        .metrics
        .iter()
        .map(|(key, value)| format!("{key}={value:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_document(path: &Path, document: &RunDocument<'_>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}
