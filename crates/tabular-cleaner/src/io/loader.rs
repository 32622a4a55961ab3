//! Dataset loading.
//!
//! The pipeline only depends on the [`DatasetLoader`] trait. [`CsvLoader`] is
//! the default implementation: a strict, header-first delimited-text reader
//! that turns null tokens into absent cells and rejects ragged rows.

use crate::config::CleanerConfig;
use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};
use crate::utils::is_null_token;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Capability to turn a path into a [`Dataset`].
pub trait DatasetLoader: Send + Sync {
    /// Load the dataset at `path`.
    ///
    /// Fails with [`CleanerError::SourceNotFound`] when the path is not a
    /// readable file and [`CleanerError::MalformedSource`] when its rows do
    /// not match the header.
    fn load(&self, path: &Path) -> Result<Dataset>;
}

/// Loader for delimited text files whose first row names the columns.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
    null_tokens: Vec<String>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::from_config(&CleanerConfig::default())
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take delimiter and null tokens from a configuration.
    pub fn from_config(config: &CleanerConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            null_tokens: config.null_tokens.clone(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_null_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Parse delimited text from any reader. `source` names it in errors.
    pub fn parse<R: Read>(&self, input: R, source: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| csv_error(e, source))?
            .clone();

        if headers.is_empty() {
            return Err(CleanerError::malformed(source, "missing header row"));
        }

        let mut seen = HashSet::with_capacity(headers.len());
        if let Some(duplicate) = headers.iter().find(|name| !seen.insert(*name)) {
            return Err(CleanerError::malformed(
                source,
                format!("duplicate column name '{}'", duplicate),
            ));
        }

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(e, source))?;
            for (column, field) in cells.iter_mut().zip(record.iter()) {
                if is_null_token(field, &self.null_tokens) {
                    column.push(None);
                } else {
                    column.push(Some(field.to_string()));
                }
            }
        }

        let rows = cells.first().map_or(0, Vec::len);
        debug!(
            "Parsed '{}': {} records x {} columns",
            source,
            rows,
            headers.len()
        );

        let columns = headers
            .iter()
            .map(str::to_string)
            .zip(cells)
            .collect::<Vec<_>>();
        Dataset::from_columns(columns)
    }
}

impl DatasetLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let source = path.display().to_string();

        if !path.exists() {
            return Err(CleanerError::source_not_found(source, "no such file"));
        }
        if !path.is_file() {
            return Err(CleanerError::source_not_found(source, "not a regular file"));
        }

        let file = File::open(path)
            .map_err(|e| CleanerError::source_not_found(source.as_str(), e.to_string()))?;
        self.parse(file, &source)
    }
}

/// Map parser errors: shape and encoding problems are the source's fault.
fn csv_error(error: csv::Error, source: &str) -> CleanerError {
    let line_of = |pos: &Option<csv::Position>| {
        pos.as_ref()
            .map_or_else(|| "?".to_string(), |p| p.line().to_string())
    };

    let reason = match error.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => Some(format!(
            "line {}: expected {} fields, found {}",
            line_of(pos),
            expected_len,
            len
        )),
        csv::ErrorKind::Utf8 { pos, .. } => Some(format!("line {}: invalid UTF-8", line_of(pos))),
        _ => None,
    };

    match reason {
        Some(reason) => CleanerError::malformed(source, reason),
        None => CleanerError::Csv(error),
    }
}
