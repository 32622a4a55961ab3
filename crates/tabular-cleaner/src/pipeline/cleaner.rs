//! The cleaning pipeline: load, count, report, fill, time.

use crate::config::{CleanerConfig, ConfigValidationError};
use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};
use crate::io::{CsvDatasetWriter, CsvLoader, DatasetLoader};
use crate::logging::LogSink;
use crate::missing;
use crate::pipeline::stage::{ProcessingStage, StageTracker};
use crate::types::{MissingValueReport, ProcessingOutcome};
use crate::utils::{format_seconds, panic_message};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Loads a delimited file, counts and fills its missing cells, and logs the run.
///
/// Use [`TabularCleaner::builder()`] to create an instance.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_cleaner::{CleanerConfig, ProcessingOutcome, TabularCleaner, TracingSink};
///
/// let cleaner = TabularCleaner::builder()
///     .config(CleanerConfig::builder().output_path("cleaned.csv").build()?)
///     .build()?;
///
/// match cleaner.process("data.csv", &TracingSink) {
///     ProcessingOutcome::Success { missing_count, elapsed, .. } => {
///         println!("filled {} cells in {:?}", missing_count, elapsed)
///     }
///     ProcessingOutcome::Failure { error, .. } => eprintln!("{}", error),
/// }
/// ```
pub struct TabularCleaner {
    config: CleanerConfig,
    loader: Arc<dyn DatasetLoader>,
    writer: CsvDatasetWriter,
}

// One instance may serve independent runs on different threads
static_assertions::assert_impl_all!(TabularCleaner: Send, Sync);

impl TabularCleaner {
    /// Create a new cleaner builder.
    pub fn builder() -> TabularCleanerBuilder {
        TabularCleanerBuilder::default()
    }

    /// Cleaner with `config` and the default CSV loader.
    pub fn new(config: CleanerConfig) -> std::result::Result<Self, ConfigValidationError> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Load the dataset at `path` with the configured loader.
    pub fn load(&self, path: &Path) -> Result<Dataset> {
        self.loader.load(path)
    }

    /// See [`missing::count_missing`].
    pub fn count_missing(&self, dataset: &Dataset) -> MissingValueReport {
        missing::count_missing(dataset)
    }

    /// See [`missing::report_if_missing`].
    pub fn report_if_missing(&self, report: &MissingValueReport, source: &str, sink: &dyn LogSink) {
        missing::report_if_missing(report, source, sink);
    }

    /// Fill absent cells with the configured sentinel.
    pub fn fill_missing(&self, dataset: Dataset) -> Result<Dataset> {
        missing::fill_missing(dataset, &self.config.sentinel)
    }

    /// Run the whole pipeline for `path`, logging to `sink`.
    ///
    /// Never returns an error and never panics: any failure, including a
    /// panic raised inside a step, is logged once at ERROR level and
    /// returned as [`ProcessingOutcome::Failure`].
    ///
    /// A contained panic still passes through the process-wide panic hook,
    /// which prints to stderr by default. The CLI replaces that hook with a
    /// DEBUG-level trace; embedding applications may want to do the same.
    pub fn process(&self, path: impl AsRef<Path>, sink: &dyn LogSink) -> ProcessingOutcome {
        let path = path.as_ref();
        let source = path.display().to_string();
        let stage = StageTracker::new();
        let start = Instant::now();

        // Sink calls run inside the guard too: a panicking sink is a failed run
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            sink.info(&format!("Starting processing for file: {}", source));
            self.run(path, &source, sink, &stage, start)
        }));

        let error = match result {
            Ok(Ok(outcome)) => return outcome,
            Ok(Err(error)) => error,
            Err(payload) => CleanerError::Internal(format!(
                "panic during {}: {}",
                stage.current().display_name(),
                panic_message(payload.as_ref())
            )),
        };

        let failed_at = stage.current();
        if !failed_at.is_terminal() {
            stage.advance(ProcessingStage::Failed);
        }
        let message = format!("Failed to process file '{}': {}", source, error);
        if panic::catch_unwind(AssertUnwindSafe(|| sink.error(&message))).is_err() {
            debug!("Log sink panicked while reporting: {}", message);
        }

        ProcessingOutcome::Failure {
            stage: failed_at,
            error,
        }
    }

    fn run(
        &self,
        path: &Path,
        source: &str,
        sink: &dyn LogSink,
        stage: &StageTracker,
        start: Instant,
    ) -> Result<ProcessingOutcome> {
        stage.advance(ProcessingStage::Loading);
        let dataset = self.load(path)?;
        debug!("Loaded {:?} from {}", dataset.frame().shape(), source);

        stage.advance(ProcessingStage::Counting);
        let report = self.count_missing(&dataset);
        self.report_if_missing(&report, source, sink);

        stage.advance(ProcessingStage::Filling);
        let dataset = self.fill_missing(dataset)?;

        let output_path = match &self.config.output_path {
            Some(output) => {
                stage.advance(ProcessingStage::Persisting);
                Some(self.writer.write(&dataset, output)?)
            }
            None => None,
        };

        let elapsed = start.elapsed();
        stage.advance(ProcessingStage::Done);
        sink.info(&format!(
            "Processing completed in {} seconds",
            format_seconds(elapsed)
        ));

        Ok(ProcessingOutcome::Success {
            dataset,
            elapsed,
            missing_count: report.count,
            report,
            output_path,
        })
    }
}

/// Builder for creating a [`TabularCleaner`] instance.
#[derive(Default)]
pub struct TabularCleanerBuilder {
    config: Option<CleanerConfig>,
    loader: Option<Arc<dyn DatasetLoader>>,
}

impl TabularCleanerBuilder {
    /// Set the cleaner configuration.
    pub fn config(mut self, config: CleanerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default [`CsvLoader`] with another dataset source.
    pub fn loader(mut self, loader: Arc<dyn DatasetLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build the cleaner.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<TabularCleaner, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let loader = self
            .loader
            .unwrap_or_else(|| Arc::new(CsvLoader::from_config(&config)) as Arc<dyn DatasetLoader>);
        let writer = CsvDatasetWriter::new(config.delimiter);

        Ok(TabularCleaner {
            config,
            loader,
            writer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{ClosureSink, LogEvent, LogLevel, MemorySink};

    /// Loader that hands out a fixed dataset regardless of path.
    struct FixedLoader(Dataset);

    impl DatasetLoader for FixedLoader {
        fn load(&self, _path: &Path) -> Result<Dataset> {
            Ok(self.0.clone())
        }
    }

    struct PanickingLoader;

    impl DatasetLoader for PanickingLoader {
        fn load(&self, _path: &Path) -> Result<Dataset> {
            panic!("loader exploded");
        }
    }

    fn with_gaps() -> Dataset {
        Dataset::from_columns(vec![
            (
                "Name".to_string(),
                vec![Some("Ana".to_string()), Some("Bo".to_string())],
            ),
            ("Department".to_string(), vec![None, Some("IT".to_string())]),
        ])
        .unwrap()
    }

    #[test]
    fn test_builder_default() {
        let cleaner = TabularCleaner::builder().build().unwrap();
        assert_eq!(cleaner.config().sentinel, "UNKNOWN");
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = CleanerConfig {
            sentinel: String::new(),
            ..CleanerConfig::default()
        };
        assert!(TabularCleaner::new(config).is_err());
    }

    #[test]
    fn test_process_event_sequence() {
        let cleaner = TabularCleaner::builder()
            .loader(Arc::new(FixedLoader(with_gaps())))
            .build()
            .unwrap();
        let sink = MemorySink::new();

        let outcome = cleaner.process("in-memory.csv", &sink);
        assert!(outcome.is_success());

        let events = sink.events();
        let levels: Vec<LogLevel> = events.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Info, LogLevel::Warning, LogLevel::Info]
        );
        assert_eq!(
            events[0].message,
            "Starting processing for file: in-memory.csv"
        );
        assert!(events[1].message.contains("1 missing values"));
        assert!(events[2].message.starts_with("Processing completed in "));
        assert!(events[2].message.ends_with(" seconds"));
    }

    #[test]
    fn test_process_uses_configured_sentinel() {
        let cleaner = TabularCleaner::builder()
            .config(CleanerConfig::builder().sentinel("N/K").build().unwrap())
            .loader(Arc::new(FixedLoader(with_gaps())))
            .build()
            .unwrap();

        let outcome = cleaner.process("x.csv", &MemorySink::new());
        match outcome {
            ProcessingOutcome::Success {
                dataset,
                missing_count,
                output_path,
                ..
            } => {
                assert_eq!(missing_count, 1);
                assert!(output_path.is_none());
                assert_eq!(dataset.cell(0, "Department").unwrap(), Some("N/K"));
            }
            ProcessingOutcome::Failure { error, .. } => panic!("unexpected failure: {}", error),
        }
    }

    #[test]
    fn test_panic_is_contained() {
        let cleaner = TabularCleaner::builder()
            .loader(Arc::new(PanickingLoader))
            .build()
            .unwrap();
        let sink = MemorySink::new();

        let outcome = cleaner.process("boom.csv", &sink);
        match outcome {
            ProcessingOutcome::Failure { stage, error } => {
                assert_eq!(stage, ProcessingStage::Loading);
                assert_eq!(error.error_code(), "INTERNAL_ERROR");
                assert!(error.to_string().contains("loader exploded"));
            }
            ProcessingOutcome::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(sink.count(LogLevel::Error), 1);
        assert_eq!(sink.count(LogLevel::Info), 1);
    }

    #[test]
    fn test_panicking_sink_is_contained() {
        let levels = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen = Arc::clone(&levels);
        let sink = ClosureSink::new(move |event: LogEvent| {
            seen.lock().push(event.level);
            if event.level == LogLevel::Info {
                panic!("sink down");
            }
        });

        let cleaner = TabularCleaner::builder()
            .loader(Arc::new(FixedLoader(with_gaps())))
            .build()
            .unwrap();

        let outcome = cleaner.process("x.csv", &sink);
        match outcome {
            ProcessingOutcome::Failure { stage, error } => {
                assert_eq!(stage, ProcessingStage::Idle);
                assert_eq!(error.error_code(), "INTERNAL_ERROR");
                assert!(error.to_string().contains("sink down"));
            }
            ProcessingOutcome::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(*levels.lock(), vec![LogLevel::Info, LogLevel::Error]);
    }

    #[test]
    fn test_sink_panicking_on_error_is_contained() {
        let sink = ClosureSink::new(|event: LogEvent| {
            if event.level == LogLevel::Error {
                panic!("sink down");
            }
        });

        let outcome = TabularCleaner::builder()
            .loader(Arc::new(PanickingLoader))
            .build()
            .unwrap()
            .process("boom.csv", &sink);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_persist_failure_reports_stage() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened as the output file
        let config = CleanerConfig::builder()
            .output_path(dir.path())
            .build()
            .unwrap();
        let cleaner = TabularCleaner::builder()
            .config(config)
            .loader(Arc::new(FixedLoader(with_gaps())))
            .build()
            .unwrap();
        let sink = MemorySink::new();

        let outcome = cleaner.process("x.csv", &sink);
        match outcome {
            ProcessingOutcome::Failure { stage, .. } => {
                assert_eq!(stage, ProcessingStage::Persisting)
            }
            ProcessingOutcome::Success { .. } => panic!("expected failure"),
        }
        assert_eq!(sink.count(LogLevel::Error), 1);
        assert_eq!(sink.count(LogLevel::Warning), 1);
    }
}
