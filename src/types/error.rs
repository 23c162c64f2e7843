//! Error types for mirra

use std::path::PathBuf;
use thiserror::Error;

/// Error types for mirra operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot file could not be parsed or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A file's size, mtime, or content hash could not be read
    #[error("Fingerprint unavailable for {path}: {source}")]
    Fingerprint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Build a fingerprint error for `path`
    pub fn fingerprint(path: &std::path::Path, source: std::io::Error) -> Self {
        SyncError::Fingerprint {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }

    /// Check if this error originated in a filesystem operation
    pub fn is_io_error(&self) -> bool {
        matches!(self, SyncError::Io(_) | SyncError::Fingerprint { .. })
    }
}
