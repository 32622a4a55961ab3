//! Dataset persistence.

use crate::dataset::Dataset;
use crate::error::{Result, ResultExt};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes a [`Dataset`] as delimited text with a header row.
///
/// Absent cells are written as empty fields. Writes are plain overwrites:
/// concurrent writers to the same path race and the last one wins.
#[derive(Debug, Clone)]
pub struct CsvDatasetWriter {
    delimiter: u8,
}

impl Default for CsvDatasetWriter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DELIMITER)
    }
}

impl CsvDatasetWriter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write `dataset` to `path`, creating parent directories as needed.
    pub fn write(&self, dataset: &Dataset, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .context(format!("Failed to create {}", path.display()))?;

        // A lone empty field would be a blank line, which readers skip
        let null_value = if dataset.width() == 1 {
            "\"\"".to_string()
        } else {
            String::new()
        };

        let mut frame = dataset.frame().clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(self.delimiter)
            .with_quote_char(b'"')
            .with_null_value(null_value)
            .finish(&mut frame)
            .context(format!("Failed to write {}", path.display()))?;

        debug!(
            "Dataset saved: {} ({} records)",
            path.display(),
            dataset.height()
        );
        Ok(path.to_path_buf())
    }
}
