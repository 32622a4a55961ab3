//! Run state machine for the cleaning pipeline.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use tracing::debug;

/// States a single run moves through.
///
/// `Idle → Loading → Counting → Filling → [Persisting] → Done`, with any
/// non-terminal state able to move to `Failed`. `Done` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStage {
    /// Nothing has happened yet
    Idle,
    /// Reading and parsing the source file
    Loading,
    /// Counting absent cells and reporting them
    Counting,
    /// Replacing absent cells with the sentinel
    Filling,
    /// Writing the filled dataset (only when an output path is configured)
    Persisting,
    /// Run completed successfully
    Done,
    /// Run stopped on an error
    Failed,
}

impl ProcessingStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading Source",
            Self::Counting => "Counting Missing Values",
            Self::Filling => "Filling Missing Values",
            Self::Persisting => "Writing Output",
            Self::Done => "Done",
            Self::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether the run may move from `self` to `next`.
    pub fn can_transition_to(&self, next: ProcessingStage) -> bool {
        use ProcessingStage::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Loading)
            | (Loading, Counting)
            | (Counting, Filling)
            | (Filling, Persisting)
            | (Filling, Done)
            | (Persisting, Done) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Current stage of one run, readable after a panic unwound through it.
#[derive(Debug)]
pub(crate) struct StageTracker {
    current: Cell<ProcessingStage>,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: Cell::new(ProcessingStage::Idle),
        }
    }

    pub(crate) fn current(&self) -> ProcessingStage {
        self.current.get()
    }

    pub(crate) fn advance(&self, next: ProcessingStage) {
        let current = self.current.get();
        debug_assert!(
            current.can_transition_to(next),
            "invalid stage transition {:?} -> {:?}",
            current,
            next
        );
        debug!("Stage: {} -> {}", current, next);
        self.current.set(next);
    }
}
