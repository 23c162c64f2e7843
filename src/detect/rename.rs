//! Rename matching over destination listings

use crate::hash::hash_file;
use crate::snapshot::SnapshotStore;
use crate::types::SyncError;
use std::path::{Path, PathBuf};

/// Search the destination listing for a file whose content matches
/// `source_path`, to reclassify a pending copy as a rename.
///
/// Invoked only when the corresponding destination file is missing. The scan
/// is sequential in listing order; a candidate qualifies when a fingerprint
/// is recorded for the source-side path it was produced from. The recorded
/// hash is reused when present, otherwise the candidate's content is hashed
/// fresh. The first exact digest match wins; with several byte-identical
/// candidates the choice follows whatever order the listing came back in.
///
/// Returns the matching destination path, or `None` when the caller should
/// fall through to a normal copy.
///
/// # Errors
/// Fails when the *source* file cannot be hashed. Candidates that cannot be
/// hashed are skipped and the scan continues.
pub fn find_renamed(
    source_path: &Path,
    destination_dir: &Path,
    destination_entries: &[PathBuf],
    snapshot: &SnapshotStore,
) -> Result<Option<PathBuf>, SyncError> {
    let source_dir = match source_path.parent() {
        Some(dir) => dir,
        None => return Ok(None),
    };

    let wanted = hash_file(source_path)?;

    for name in destination_entries {
        let candidate = destination_dir.join(name);
        if !candidate.is_file() {
            continue;
        }

        // The fingerprint for a destination entry lives under the source
        // path it was copied from.
        let recorded = match snapshot.get(&source_dir.join(name)) {
            Some(entry) => entry,
            None => continue,
        };

        let candidate_digest = match recorded.hash.clone() {
            Some(digest) => digest,
            None => match hash_file(&candidate) {
                Ok(digest) => digest,
                Err(_) => continue,
            },
        };

        if candidate_digest == wanted {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
