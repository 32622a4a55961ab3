//! Synthetic employee data with randomly missing departments.
//!
//! Used by the CLI's `--generate-sample` flag to produce a file worth
//! cleaning. Seeded generators are deterministic.

use crate::dataset::Dataset;
use crate::error::Result;
use crate::io::CsvDatasetWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Department choices; `None` produces an absent cell.
const DEPARTMENTS: [Option<&str>; 4] = [Some("HR"), Some("IT"), Some("Finance"), None];

/// Generates `ID, Name, Age, Salary, Department` records.
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    /// Deterministic generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Build `rows` records.
    pub fn generate(&mut self, rows: usize) -> Result<Dataset> {
        let mut ids = Vec::with_capacity(rows);
        let mut names = Vec::with_capacity(rows);
        let mut ages = Vec::with_capacity(rows);
        let mut salaries = Vec::with_capacity(rows);
        let mut departments = Vec::with_capacity(rows);

        for i in 1..=rows {
            ids.push(Some(i.to_string()));
            names.push(Some(format!("User_{}", i)));
            ages.push(Some(self.rng.gen_range(18..60).to_string()));
            salaries.push(Some(self.rng.gen_range(30_000..100_000).to_string()));
            let department = DEPARTMENTS[self.rng.gen_range(0..DEPARTMENTS.len())];
            departments.push(department.map(str::to_string));
        }

        Dataset::from_columns(vec![
            ("ID".to_string(), ids),
            ("Name".to_string(), names),
            ("Age".to_string(), ages),
            ("Salary".to_string(), salaries),
            ("Department".to_string(), departments),
        ])
    }

    /// Generate `rows` records and write them to `path` (absent cells as empty fields).
    pub fn write_csv(&mut self, path: &Path, rows: usize) -> Result<Dataset> {
        let dataset = self.generate(rows)?;
        CsvDatasetWriter::default().write(&dataset, path)?;
        Ok(dataset)
    }
}
