//! SnapshotStore - Persisted record of last-confirmed file fingerprints

use crate::types::{FileFingerprint, SyncError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Mapping from canonical absolute source path to the fingerprint recorded
/// after the last confirmed copy or rename.
///
/// Keys are source-side paths only; destination paths are derived at sync
/// time and never stored. Entries are written only after an operation
/// succeeds, so the store always reflects confirmed state, not attempted
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    entries: HashMap<String, FileFingerprint>,
}

impl SnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from disk.
    ///
    /// A missing file is equivalent to an empty mapping; an unparseable file
    /// is an error (a corrupt snapshot must not silently degrade every file
    /// to "new").
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let text = fs::read_to_string(path)?;
        let entries: HashMap<String, FileFingerprint> = serde_json::from_str(&text)
            .map_err(|e| {
                SyncError::Snapshot(format!("Failed to parse {}: {}", path.display(), e))
            })?;

        Ok(Self { entries })
    }

    /// Persist the store to disk atomically.
    ///
    /// The mapping is serialized to a sibling temp file which is then renamed
    /// over the target, so a crash mid-write leaves the previous snapshot
    /// intact.
    pub fn save(&self, path: &Path) -> Result<(), SyncError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            SyncError::Snapshot(format!("Failed to serialize snapshot: {}", e))
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot.json".to_string());
        let temp_path = path.with_file_name(format!("{}.tmp", file_name));

        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Look up the recorded fingerprint for a source path
    pub fn get(&self, path: &Path) -> Option<&FileFingerprint> {
        self.entries.get(&key_for(path))
    }

    /// Check whether a source path has a recorded fingerprint
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&key_for(path))
    }

    /// Record a fingerprint for a source path, replacing any previous entry.
    ///
    /// Call this only after the corresponding copy or rename succeeded.
    pub fn record(&mut self, path: &Path, fingerprint: FileFingerprint) {
        self.entries.insert(key_for(path), fingerprint);
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical snapshot key for a path.
///
/// The parent directory is canonicalized and the file name re-attached, so a
/// source file that no longer exists (the rename-detection case) still
/// resolves to the key its fingerprint was recorded under. Paths whose parent
/// cannot be resolved fall back to the literal path string.
fn key_for(path: &Path) -> String {
    let canonical: Option<PathBuf> = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent).ok().map(|p| p.join(name)),
        _ => fs::canonicalize(path).ok(),
    };

    canonical
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
