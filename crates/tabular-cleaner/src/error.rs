//! Error types for the cleaning pipeline.
//!
//! Loading failures get their own named variants so callers can tell a
//! missing source apart from a badly shaped one. Everything else (I/O,
//! polars, csv) is wrapped so it can be reported once at the
//! [`TabularCleaner::process`](crate::TabularCleaner::process) boundary.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleanerError {
    /// The source path does not resolve to a readable file.
    #[error("Source '{path}' not found or unreadable: {reason}")]
    SourceNotFound { path: String, reason: String },

    /// The source is readable but its rows do not line up with the header.
    #[error("Malformed source '{path}': {reason}")]
    MalformedSource { path: String, reason: String },

    /// A dataset column is not text-typed.
    #[error("Column '{column}' has unsupported type {dtype} (expected String)")]
    UnsupportedColumnType { column: String, dtype: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal fault, including a panic caught at the pipeline boundary.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parser error wrapper.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleanerError>,
    },
}

impl CleanerError {
    /// Build a [`CleanerError::SourceNotFound`] for `path`.
    pub fn source_not_found(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceNotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`CleanerError::MalformedSource`] for `path`.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleanerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code, preserved through [`with_context`](Self::with_context).
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::MalformedSource { .. } => "MALFORMED_SOURCE",
            Self::UnsupportedColumnType { .. } => "UNSUPPORTED_COLUMN_TYPE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error came from the source file itself (missing or malformed).
    pub fn is_source_error(&self) -> bool {
        match self {
            Self::SourceNotFound { .. } | Self::MalformedSource { .. } => true,
            Self::WithContext { source, .. } => source.is_source_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleanerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleanerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleanerError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleanerError::Io(e).with_context(context))
    }
}
