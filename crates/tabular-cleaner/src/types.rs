//! Result types shared across the pipeline.

use crate::dataset::Dataset;
use crate::error::CleanerError;
use crate::pipeline::ProcessingStage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Missing-cell count for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub count: usize,
}

/// Count of absent cells across a whole dataset at the moment it was computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValueReport {
    /// Total absent cells across all records and columns.
    pub count: usize,
    /// Columns with at least one absent cell, in column order.
    pub by_column: Vec<ColumnMissing>,
}

impl MissingValueReport {
    /// `true` when at least one cell is absent.
    pub fn has_missing(&self) -> bool {
        self.count > 0
    }

    /// Absent cells in `column` (0 if the column has none or does not exist).
    pub fn column_count(&self, column: &str) -> usize {
        self.by_column
            .iter()
            .find(|c| c.column == column)
            .map_or(0, |c| c.count)
    }
}

/// Result of one [`TabularCleaner::process`](crate::TabularCleaner::process) run.
#[derive(Debug)]
pub enum ProcessingOutcome {
    /// Every step completed and the dataset has no absent cells left.
    Success {
        dataset: Dataset,
        elapsed: Duration,
        missing_count: usize,
        report: MissingValueReport,
        /// Where the filled dataset was written, if persistence was configured.
        output_path: Option<PathBuf>,
    },
    /// The run stopped at `stage`; exactly one ERROR event was emitted.
    Failure {
        stage: ProcessingStage,
        error: CleanerError,
    },
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The cleaned dataset, if the run succeeded.
    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Self::Success { dataset, .. } => Some(dataset),
            Self::Failure { .. } => None,
        }
    }

    /// Take the cleaned dataset, if the run succeeded.
    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            Self::Success { dataset, .. } => Some(dataset),
            Self::Failure { .. } => None,
        }
    }

    /// Human-readable description of the failure, if any.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error.to_string()),
        }
    }

    /// Flatten the outcome into a serializable summary for `source`.
    pub fn summary(&self, source: impl Into<String>) -> ProcessingSummary {
        let source = source.into();
        match self {
            Self::Success {
                dataset,
                elapsed,
                missing_count,
                report,
                output_path,
            } => ProcessingSummary {
                source,
                success: true,
                rows: Some(dataset.height()),
                columns: Some(dataset.width()),
                missing_count: Some(*missing_count),
                missing_by_column: report.by_column.clone(),
                elapsed_seconds: Some(elapsed.as_secs_f64()),
                output_path: output_path.clone(),
                failed_stage: None,
                error: None,
            },
            Self::Failure { stage, error } => ProcessingSummary {
                source,
                success: false,
                rows: None,
                columns: None,
                missing_count: None,
                missing_by_column: Vec::new(),
                elapsed_seconds: None,
                output_path: None,
                failed_stage: Some(*stage),
                error: Some(ErrorSummary {
                    code: error.error_code().to_string(),
                    message: error.to_string(),
                }),
            },
        }
    }
}

/// Serializable view of a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub code: String,
    pub message: String,
}

/// Serializable summary of a run, used for `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub source: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_by_column: Vec<ColumnMissing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<ProcessingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
}
