//! CLI entry point for the CSV cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tabular_cleaner::{
    COMMON_NULL_TOKENS, CleanerConfig, CleanerConfigBuilder, ProcessingOutcome, SampleGenerator,
    TabularCleaner, TracingSink,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fill missing values in a CSV file and log the run",
    long_about = "Loads a delimited text file, reports how many cells are missing, \
                  replaces each missing cell with a sentinel value and logs the elapsed time.\n\n\
                  EXAMPLES:\n  \
                  # Clean a file, logging to stderr\n  \
                  tabular-cleaner -i data.csv\n\n  \
                  # Write the cleaned file and append log lines to a log file\n  \
                  tabular-cleaner -i data.csv -o cleaned.csv --log-file data_processing.log\n\n  \
                  # Generate a 10-row sample file first, then clean it\n  \
                  tabular-cleaner -i data.csv --generate-sample 10 --seed 42\n\n  \
                  # Treat NA / null / none (and friends) as missing, print a JSON summary\n  \
                  tabular-cleaner -i data.csv --common-null-tokens --json"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: PathBuf,

    /// Write the cleaned dataset to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Value written into every missing cell
    ///
    /// Defaults to "UNKNOWN" (or the value from --config)
    #[arg(long)]
    sentinel: Option<String>,

    /// Additional text treated as missing (repeatable, case-insensitive)
    ///
    /// Empty and whitespace-only fields are always treated as missing
    #[arg(long = "null-token", value_name = "TOKEN")]
    null_tokens: Vec<String>,

    /// Also treat NA, N/A, #N/A, null, none, nan and missing as missing
    #[arg(long)]
    common_null_tokens: bool,

    /// Field delimiter (single ASCII character)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate a sample file with this many rows at --input before processing
    #[arg(long, value_name = "ROWS")]
    generate_sample: Option<usize>,

    /// Seed for --generate-sample
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append log lines to this file instead of writing them to stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print a JSON summary of the run to stdout
    ///
    /// Logging is disabled unless --log-file is set, so stdout only
    /// contains the JSON document.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Merge the optional JSON config file with command-line overrides.
fn build_config(args: &Args) -> Result<CleanerConfig> {
    let base = match &args.config {
        Some(path) => CleanerConfig::from_json_file(path)
            .with_context(|| format!("Could not load config {}", path.display()))?,
        None => CleanerConfig::default(),
    };

    let mut builder =
        CleanerConfigBuilder::from_config(base).null_tokens(args.null_tokens.iter().cloned());

    if args.common_null_tokens {
        builder = builder.null_tokens(COMMON_NULL_TOKENS);
    }

    if let Some(ref sentinel) = args.sentinel {
        builder = builder.sentinel(sentinel);
    }

    if let Some(delimiter) = args.delimiter {
        if !delimiter.is_ascii() {
            return Err(anyhow!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            ));
        }
        builder = builder.delimiter(delimiter as u8);
    }

    if let Some(ref output) = args.output {
        builder = builder.output_path(output);
    }

    Ok(builder.build()?)
}

fn main() -> Result<ExitCode> {
    // Load environment variables (e.g. RUST_LOG) from .env file
    dotenv().ok();

    let args = Args::parse();

    // With --json, stdout must only carry the summary
    if !args.json || args.log_file.is_some() {
        init_logging(&args.log_level, args.quiet, args.log_file.as_deref())?;
    }

    // process() reports contained panics as an ERROR event; keep the
    // default hook's backtrace out of the output unless debugging
    std::panic::set_hook(Box::new(|info| debug!("{}", info)));

    let config = build_config(&args)?;
    debug!("Effective configuration: {:?}", config);

    if let Some(rows) = args.generate_sample {
        let mut generator = match args.seed {
            Some(seed) => SampleGenerator::new(seed),
            None => SampleGenerator::from_entropy(),
        };
        generator.write_csv(&args.input, rows)?;
        info!(
            "Sample CSV file '{}' created with {} rows",
            args.input.display(),
            rows
        );
    }

    let cleaner = TabularCleaner::new(config)?;
    let outcome = cleaner.process(&args.input, &TracingSink);

    if args.json {
        let summary = outcome.summary(args.input.display().to_string());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    // The failure itself was already logged by the pipeline
    Ok(match outcome {
        ProcessingOutcome::Success { .. } => ExitCode::SUCCESS,
        ProcessingOutcome::Failure { .. } => ExitCode::FAILURE,
    })
}
