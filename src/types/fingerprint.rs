//! FileFingerprint - Comparable identity of a single file

use crate::hash::hash_file;
use crate::types::SyncError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Comparable identity of a file: size, modification time, and an optional
/// content hash.
///
/// The modification time is stored as floating-point seconds since the Unix
/// epoch so it round-trips through the snapshot file without losing
/// sub-second precision. The hash, when present, is the lowercase hex digest
/// of the full file content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFingerprint {
    /// File size in bytes
    pub size: u64,

    /// Modification time, seconds since the Unix epoch
    pub mtime: f64,

    /// Content hash (computed lazily)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hash: Option<String>,
}

impl FileFingerprint {
    /// Read size and modification time from a single metadata call.
    ///
    /// The content hash is left unset; use [`FileFingerprint::capture`] when
    /// a ready digest is required.
    pub fn stat(path: &Path) -> Result<Self, SyncError> {
        let metadata = std::fs::metadata(path).map_err(|e| SyncError::fingerprint(path, e))?;
        let mtime = metadata
            .modified()
            .map_err(|e| SyncError::fingerprint(path, e))?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        Ok(Self {
            size: metadata.len(),
            mtime,
            hash: None,
        })
    }

    /// Read size and modification time, and hash the file content.
    ///
    /// This is the form recorded in the snapshot after a confirmed copy or
    /// rename: rename matching needs a ready digest on both sides.
    pub fn capture(path: &Path) -> Result<Self, SyncError> {
        let fingerprint = Self::stat(path)?;
        let digest = hash_file(path)?;
        Ok(fingerprint.with_hash(digest))
    }

    /// Set the content hash on this fingerprint
    pub fn with_hash(mut self, hash: String) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Check if this fingerprint has a computed hash
    pub fn has_hash(&self) -> bool {
        self.hash.is_some()
    }
}
