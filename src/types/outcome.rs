//! Outcome - Per-file result of one reconciliation step

/// Result of reconciling a single source file.
///
/// Failures are values, not unwound errors: the walk records them and moves
/// on to the next entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// File content was copied to the destination
    Copied { bytes: u64 },

    /// An existing destination file was moved to the new name
    Renamed,

    /// File is identical to the recorded state, nothing done
    Skipped,

    /// The file could not be synchronized
    Failed(String),
}

impl Outcome {
    /// Check if this outcome represents a completed transfer or move
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}
