//! Logging sinks that receive pipeline events.
//!
//! The pipeline never reaches for a global logger: a [`LogSink`] is passed
//! into every [`TabularCleaner::process`](crate::TabularCleaner::process) call.
//! Sinks are append-only and the pipeline never reads back what it logged.
//!
//! # Example
//!
//! ```rust,ignore
//! use tabular_cleaner::{LogLevel, MemorySink, TabularCleaner};
//!
//! let sink = MemorySink::new();
//! let outcome = TabularCleaner::builder().build()?.process("data.csv", &sink);
//!
//! assert_eq!(sink.count(LogLevel::Error), 0);
//! ```

use super::event::{LogEvent, LogLevel};
use parking_lot::Mutex;

/// Receiver for pipeline log events.
///
/// Implementations must be `Send + Sync` so one sink can be shared by
/// independent runs on different threads.
pub trait LogSink: Send + Sync {
    /// Append one event.
    fn emit(&self, event: LogEvent);

    fn info(&self, message: &str) {
        self.emit(LogEvent::info(message));
    }

    fn warning(&self, message: &str) {
        self.emit(LogEvent::warning(message));
    }

    fn error(&self, message: &str) {
        self.emit(LogEvent::error(message));
    }
}

/// Forwards events to the `tracing` macros of the matching level.
///
/// Persistence and formatting are left to whatever subscriber the process
/// installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        match event.level {
            LogLevel::Info => tracing::info!("{}", event.message),
            LogLevel::Warning => tracing::warn!("{}", event.message),
            LogLevel::Error => tracing::error!("{}", event.message),
        }
    }
}

/// In-memory sink that keeps every event in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Number of events at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.events.lock().iter().filter(|e| e.level == level).count()
    }

    /// Messages of the events at `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        self.events.lock().push(event);
    }
}

/// Wrapper that implements [`LogSink`] using a closure.
///
/// # Example
///
/// ```rust,ignore
/// let sink = ClosureSink::new(|event| eprintln!("{}", event));
/// ```
pub struct ClosureSink<F>
where
    F: Fn(LogEvent) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureSink<F>
where
    F: Fn(LogEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> LogSink for ClosureSink<F>
where
    F: Fn(LogEvent) + Send + Sync,
{
    fn emit(&self, event: LogEvent) {
        (self.callback)(event);
    }
}

static_assertions::assert_impl_all!(MemorySink: Send, Sync);
static_assertions::assert_impl_all!(TracingSink: Send, Sync);
static_assertions::assert_impl_all!(LogEvent: Send, Sync);
