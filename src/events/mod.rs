//! Sync events and the sinks that receive them

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One notable action during a sync or baseline run.
///
/// Events render to the human-readable strings the surrounding system shows
/// live and appends to the durable log. `SkippedIdentical` is the one
/// low-priority event: shown live, excluded from the durable log.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A missing destination directory was created
    DirectoryCreated { path: PathBuf },

    /// A file copy is starting
    Copying { source: PathBuf, dest: PathBuf },

    /// A file copy completed
    CopyFinished {
        source: PathBuf,
        dest: PathBuf,
        seconds: f64,
    },

    /// A file matched its recorded fingerprint and was left alone
    SkippedIdentical { path: PathBuf },

    /// A destination file was moved instead of re-copying identical bytes
    RenameDetected { from: PathBuf, to: PathBuf },

    /// A single file failed to copy or rename; the walk continued
    CopyFailed { path: PathBuf, reason: String },

    /// A destination directory could not be created; its subtree was skipped
    DirectoryFailed { path: PathBuf, reason: String },

    /// A file or directory listing could not be read
    ReadFailed { path: PathBuf, reason: String },

    /// A configured source root does not exist; it was skipped
    SourceMissing { root: PathBuf },
}

impl SyncEvent {
    /// Whether this event belongs in the durable log.
    ///
    /// Skip notices are shown live only; everything else is appended.
    pub fn is_durable(&self) -> bool {
        !matches!(self, SyncEvent::SkippedIdentical { .. })
    }

    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SyncEvent::CopyFailed { .. }
                | SyncEvent::DirectoryFailed { .. }
                | SyncEvent::ReadFailed { .. }
                | SyncEvent::SourceMissing { .. }
        )
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::DirectoryCreated { path } => {
                write!(f, "Created directory: {}", path.display())
            }
            SyncEvent::Copying { source, dest } => {
                write!(f, "Copying: {} to {}", source.display(), dest.display())
            }
            SyncEvent::CopyFinished {
                source,
                dest,
                seconds,
            } => write!(
                f,
                "Finished copying: {} to {} in {:.2} seconds",
                source.display(),
                dest.display(),
                seconds
            ),
            SyncEvent::SkippedIdentical { path } => {
                write!(f, "Skipped (identical): {}", path.display())
            }
            SyncEvent::RenameDetected { from, to } => {
                write!(f, "Rename detected: {} to {}", from.display(), to.display())
            }
            SyncEvent::CopyFailed { path, reason } => {
                write!(f, "Error copying {}: {}", path.display(), reason)
            }
            SyncEvent::DirectoryFailed { path, reason } => {
                write!(f, "Error creating directory {}: {}", path.display(), reason)
            }
            SyncEvent::ReadFailed { path, reason } => {
                write!(f, "Error reading {}: {}", path.display(), reason)
            }
            SyncEvent::SourceMissing { root } => {
                write!(f, "Source folder not found: {}", root.display())
            }
        }
    }
}

/// Receiver for sync events.
///
/// The engine pushes every event here; the sink decides what to display,
/// store, or drop.
pub trait EventSink {
    fn emit(&mut self, event: &SyncEvent);
}

/// Sink that collects events in memory. Used by tests and by callers that
/// want to inspect a run after the fact.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<SyncEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count events matching a predicate
    pub fn count_where(&self, predicate: impl Fn(&SyncEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &SyncEvent) {
        self.events.push(event.clone());
    }
}

/// Sink that appends durable events to a text log, one timestamped line per
/// event. Low-priority events are dropped.
pub struct LogFileSink {
    out: std::fs::File,
}

impl LogFileSink {
    /// Open (or create) the log file in append mode
    pub fn open(path: &Path) -> Result<Self, crate::types::SyncError> {
        let out = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self { out })
    }
}

impl EventSink for LogFileSink {
    fn emit(&mut self, event: &SyncEvent) {
        if !event.is_durable() {
            return;
        }
        // A log write failure must not interrupt the run.
        let line = format!(
            "{} {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            event
        );
        let _ = self.out.write_all(line.as_bytes());
    }
}
