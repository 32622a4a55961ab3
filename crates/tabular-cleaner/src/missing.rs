//! Missing-value detection and remediation.
//!
//! There is a single fill policy: every absent cell, in every column, is
//! replaced by the same sentinel text.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::logging::LogSink;
use crate::types::{ColumnMissing, MissingValueReport};
use polars::prelude::*;
use tracing::debug;

/// Count absent cells across all records and columns.
///
/// A dataset with zero records reports 0.
pub fn count_missing(dataset: &Dataset) -> MissingValueReport {
    let by_column: Vec<ColumnMissing> = dataset
        .frame()
        .get_columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| ColumnMissing {
            column: column.name().to_string(),
            count: column.null_count(),
        })
        .collect();

    MissingValueReport {
        count: by_column.iter().map(|c| c.count).sum(),
        by_column,
    }
}

/// Emit one WARNING naming `source` and the count when anything is missing.
pub fn report_if_missing(report: &MissingValueReport, source: &str, sink: &dyn LogSink) {
    if report.has_missing() {
        sink.warning(&format!(
            "File '{}' contains {} missing values",
            source, report.count
        ));
    }
}

/// Replace every absent cell with `sentinel`.
///
/// Present cells, column order and record order are left untouched. The
/// filled frame is assembled in full before it replaces the input, so callers
/// never observe a partly filled dataset.
pub fn fill_missing(dataset: Dataset, sentinel: &str) -> Result<Dataset> {
    let frame = dataset.into_frame();
    let mut columns = Vec::with_capacity(frame.width());

    for column in frame.get_columns() {
        let missing = column.null_count();
        if missing == 0 {
            columns.push(column.clone());
            continue;
        }

        let filled: StringChunked = column
            .str()?
            .into_iter()
            .map(|value| Some(value.unwrap_or(sentinel)))
            .collect();
        columns.push(
            filled
                .with_name(column.name().clone())
                .into_series()
                .into_column(),
        );
        debug!("Filled '{}': {} values", column.name(), missing);
    }

    Dataset::from_frame(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemorySink};
    use pretty_assertions::assert_eq;

    fn department_dataset() -> Dataset {
        let departments = [
            Some("HR"),
            None,
            Some("IT"),
            Some("Finance"),
            None,
            Some("HR"),
            Some("IT"),
            None,
            Some("Finance"),
            Some("IT"),
        ];
        Dataset::from_columns(vec![(
            "Department".to_string(),
            departments.iter().map(|d| d.map(str::to_string)).collect(),
        )])
        .unwrap()
    }

    #[test]
    fn test_count_missing() {
        let report = count_missing(&department_dataset());
        assert_eq!(report.count, 3);
        assert_eq!(
            report.by_column,
            vec![ColumnMissing {
                column: "Department".to_string(),
                count: 3
            }]
        );
    }

    #[test]
    fn test_count_missing_across_columns() {
        let dataset = Dataset::from_columns(vec![
            ("a".to_string(), vec![None, Some("1".to_string()), None]),
            ("b".to_string(), vec![Some("x".to_string()); 3]),
            ("c".to_string(), vec![None, None, None]),
        ])
        .unwrap();
        let report = count_missing(&dataset);
        assert_eq!(report.count, 5);
        assert_eq!(report.column_count("a"), 2);
        assert_eq!(report.column_count("b"), 0);
        assert_eq!(report.column_count("c"), 3);
        assert_eq!(report.by_column.len(), 2);
    }

    #[test]
    fn test_count_missing_zero_records() {
        let dataset = Dataset::from_columns(vec![("a".to_string(), Vec::new())]).unwrap();
        assert_eq!(count_missing(&dataset).count, 0);
        assert_eq!(count_missing(&Dataset::empty()).count, 0);
    }

    #[test]
    fn test_report_if_missing_warns_once() {
        let sink = MemorySink::new();
        let report = count_missing(&department_dataset());
        report_if_missing(&report, "data.csv", &sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.messages(LogLevel::Warning),
            vec!["File 'data.csv' contains 3 missing values"]
        );
    }

    #[test]
    fn test_report_if_missing_silent_when_clean() {
        let sink = MemorySink::new();
        report_if_missing(&MissingValueReport::default(), "data.csv", &sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fill_missing_replaces_only_absent_cells() {
        let original = department_dataset();
        let before = original.column_values("Department").unwrap();

        let filled = fill_missing(original, "UNKNOWN").unwrap();
        let after = filled.column_values("Department").unwrap();

        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(&after) {
            match old {
                Some(value) => assert_eq!(new.as_deref(), Some(value.as_str())),
                None => assert_eq!(new.as_deref(), Some("UNKNOWN")),
            }
        }
        assert_eq!(count_missing(&filled).count, 0);
    }

    #[test]
    fn test_fill_missing_preserves_shape_and_order() {
        let dataset = Dataset::from_columns(vec![
            ("z".to_string(), vec![None, Some("2".to_string())]),
            ("a".to_string(), vec![Some("1".to_string()), None]),
        ])
        .unwrap();
        let filled = fill_missing(dataset, "S").unwrap();

        assert_eq!(filled.column_names(), vec!["z", "a"]);
        assert_eq!(filled.height(), 2);
        assert_eq!(
            filled.column_values("z").unwrap(),
            vec![Some("S".to_string()), Some("2".to_string())]
        );
        assert_eq!(
            filled.column_values("a").unwrap(),
            vec![Some("1".to_string()), Some("S".to_string())]
        );
    }

    #[test]
    fn test_fill_missing_is_idempotent() {
        let once = fill_missing(department_dataset(), "UNKNOWN").unwrap();
        let twice = fill_missing(once.clone(), "UNKNOWN").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_missing_without_absent_cells_is_identity() {
        let dataset = Dataset::from_columns(vec![(
            "a".to_string(),
            vec![Some(String::new()), Some("0".to_string())],
        )])
        .unwrap();
        let filled = fill_missing(dataset.clone(), "UNKNOWN").unwrap();
        assert_eq!(filled, dataset);
    }
}
