//! CSV Missing-Value Remediation Library
//!
//! Loads a delimited text file, counts its missing cells, fills them with a
//! sentinel value, and records timing and diagnostics for the run.
//!
//! # Overview
//!
//! A run is strictly linear:
//!
//! - **Load**: parse the file into a [`Dataset`]; empty fields and configured
//!   null tokens become absent cells
//! - **Count**: build a [`MissingValueReport`] and emit one WARNING if anything is missing
//! - **Fill**: replace every absent cell with the sentinel (`"UNKNOWN"` by default)
//! - **Persist**: optionally write the cleaned file
//! - **Time**: emit the elapsed time at INFO level
//!
//! Failures never escape: [`TabularCleaner::process`] always returns a
//! [`ProcessingOutcome`], logging exactly one ERROR event when the run fails.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_cleaner::{CleanerConfig, ProcessingOutcome, TabularCleaner, TracingSink};
//!
//! let config = CleanerConfig::builder()
//!     .null_tokens(["NA", "null"])
//!     .output_path("outputs/cleaned.csv")
//!     .build()?;
//!
//! let cleaner = TabularCleaner::new(config)?;
//!
//! match cleaner.process("data.csv", &TracingSink) {
//!     ProcessingOutcome::Success { missing_count, .. } => println!("filled {missing_count} cells"),
//!     ProcessingOutcome::Failure { error, .. } => eprintln!("{error}"),
//! }
//! ```
//!
//! # Logging
//!
//! The pipeline logs through a [`LogSink`] passed into every `process` call.
//! [`TracingSink`] forwards to `tracing`; [`MemorySink`] collects events in memory.

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod logging;
pub mod missing;
pub mod pipeline;
pub mod sample;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError, DEFAULT_SENTINEL};
pub use dataset::Dataset;
pub use error::{CleanerError, Result as CleanerResult, ResultExt};
pub use io::{CsvDatasetWriter, CsvLoader, DatasetLoader};
pub use logging::{ClosureSink, LogEvent, LogLevel, LogSink, MemorySink, TracingSink};
pub use missing::{count_missing, fill_missing, report_if_missing};
pub use pipeline::{ProcessingStage, TabularCleaner, TabularCleanerBuilder};
pub use sample::SampleGenerator;
pub use types::{
    ColumnMissing, ErrorSummary, MissingValueReport, ProcessingOutcome, ProcessingSummary,
};
pub use utils::{COMMON_NULL_TOKENS, format_seconds, is_null_token};
