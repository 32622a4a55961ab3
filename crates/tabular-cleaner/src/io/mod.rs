//! Reading and writing delimited text datasets.

mod loader;
mod writer;

pub use loader::{CsvLoader, DatasetLoader};
pub use writer::CsvDatasetWriter;
