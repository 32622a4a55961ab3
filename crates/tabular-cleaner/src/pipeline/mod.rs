//! Pipeline module.
//!
//! This module provides the cleaning pipeline and its run state machine.

mod cleaner;
mod stage;

pub use cleaner::{TabularCleaner, TabularCleanerBuilder};
pub use stage::ProcessingStage;
