//! In-memory dataset owned by a single pipeline run.
//!
//! A [`Dataset`] wraps a polars [`DataFrame`] whose columns are all
//! `String`-typed. A present cell is the exact text read from the source
//! (numbers included, since values are never coerced); an absent cell is a
//! polars null, so it can never be confused with a legitimate empty string
//! or zero.

use crate::error::{CleanerError, Result};
use polars::prelude::*;

/// Ordered records sharing one column set, backed by a `DataFrame`.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Build a dataset from named columns of optional cells.
    ///
    /// All columns must have the same length and distinct names.
    pub fn from_columns(columns: Vec<(String, Vec<Option<String>>)>) -> Result<Self> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        let frame = DataFrame::new(columns)?;
        Ok(Self { frame })
    }

    /// Wrap an existing `DataFrame`, rejecting columns that are not `String`.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        if let Some(column) = frame
            .get_columns()
            .iter()
            .find(|c| c.dtype() != &DataType::String)
        {
            return Err(CleanerError::UnsupportedColumnType {
                column: column.name().to_string(),
                dtype: column.dtype().to_string(),
            });
        }
        Ok(Self { frame })
    }

    /// A dataset with no columns and no records.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }

    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Take the underlying frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of records.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// `true` when the dataset holds zero records.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Read one cell. `None` means the cell is absent.
    pub fn cell(&self, row: usize, column: &str) -> Result<Option<&str>> {
        if row >= self.frame.height() {
            return Err(CleanerError::Internal(format!(
                "row {} out of bounds for dataset with {} records",
                row,
                self.frame.height()
            )));
        }
        Ok(self.frame.column(column)?.str()?.get(row))
    }

    /// All cells of one column, in record order.
    pub fn column_values(&self, column: &str) -> Result<Vec<Option<String>>> {
        let values = self
            .frame
            .column(column)?
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        Ok(values)
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.column_names() == other.column_names() && self.frame.equals_missing(&other.frame)
    }
}

impl TryFrom<DataFrame> for Dataset {
    type Error = CleanerError;

    fn try_from(frame: DataFrame) -> Result<Self> {
        Self::from_frame(frame)
    }
}
