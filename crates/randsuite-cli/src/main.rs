//! CLI for randsuite: run a generator through the uniformity battery.

mod commands;
mod generators;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "randsuite")]
#[command(about = "randsuite: does your generator really look uniform over [0, 1)?")]
#[command(version = randsuite_core::VERSION)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a batch from a generator, run the battery, gate on the summary score.
    /// Exits 0 on pass, 1 on fail, 2 on configuration or output errors.
    Run {
        /// Generator to test
        #[arg(long, default_value = "std", value_parser = ["std", "thread", "os", "sha256", "constant", "alternating", "stdin"])]
        generator: String,

        /// Seed for the std and sha256 generators
        #[arg(long)]
        seed: Option<u64>,

        /// Value emitted by the constant and alternating generators
        #[arg(long, default_value = "0.5")]
        value: f64,

        /// Number of values to draw (default 1048576)
        #[arg(long)]
        samples: Option<usize>,

        /// JSON suite configuration file; flags below override it
        #[arg(long)]
        config: Option<String>,

        /// Comma-separated test names (default: the full battery)
        #[arg(long)]
        tests: Option<String>,

        /// Comma-separated summary names (default: average_summary)
        #[arg(long)]
        summaries: Option<String>,

        /// Frequency divisor for entropy and chi-squared
        #[arg(long, value_parser = [
            "bucket_count", "buckets", "faithful",
            "sample_size", "samples", "corrected",
        ])]
        normalization: Option<String>,

        /// Quantize values into this many bins for entropy and chi-squared
        #[arg(long)]
        bins: Option<usize>,

        /// Run tests on parallel threads
        #[arg(long)]
        parallel: bool,

        /// Write the reports as JSON
        #[arg(long)]
        output: Option<String>,

        /// Minimum summary score for a pass
        #[arg(long, default_value = "0.99")]
        threshold: f64,
    },

    /// List available tests, summaries and generators
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run {
            generator,
            seed,
            value,
            samples,
            config,
            tests,
            summaries,
            normalization,
            bins,
            parallel,
            output,
            threshold,
        } => {
            let result = commands::run::run(commands::run::RunCommandConfig {
                generator: &generator,
                seed,
                value,
                samples,
                config_path: config.as_deref(),
                tests: tests.as_deref(),
                summaries: summaries.as_deref(),
                normalization: normalization.as_deref(),
                bins,
                parallel,
                output_path: output.as_deref(),
                threshold,
            });
            match result {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::from(1),
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::from(2)
                }
            }
        }
        Commands::List => {
            commands::list::run();
            ExitCode::SUCCESS
        }
    }
}
