//! Structured logging sink used by the pipeline.

mod event;
mod sink;

pub use event::{LogEvent, LogLevel};
pub use sink::{ClosureSink, LogSink, MemorySink, TracingSink};
