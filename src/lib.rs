//! # mirra - One-Way Folder Mirroring
//!
//! Mirrors a set of source folders beneath a destination root, copying only
//! files that are new or changed, and detecting renamed files by content
//! hash so identical bytes are never copied twice.
//!
//! A persisted snapshot records the last confirmed fingerprint (size,
//! modification time, content hash) of every source file; cheap metadata
//! checks short-circuit hashing, and hashing short-circuits copying.

// Module declarations
pub mod config;
pub mod detect;
pub mod driver;
pub mod events;
pub mod hash;
pub mod reconcile;
pub mod snapshot;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::SyncConfiguration;
pub use driver::RunSummary;
pub use events::{EventSink, MemorySink, SyncEvent};
pub use snapshot::SnapshotStore;
pub use types::{FileFingerprint, Outcome, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
