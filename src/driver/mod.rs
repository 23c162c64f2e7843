//! Sync driver - runs reconciliation across the configured source roots

use crate::config::SyncConfiguration;
use crate::events::{EventSink, SyncEvent};
use crate::reconcile::Reconciler;
use crate::snapshot::SnapshotStore;
use crate::types::{FileFingerprint, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// Aggregated counters for one sync or baseline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files copied to the destination
    pub files_copied: usize,
    /// Destination files moved instead of re-copied
    pub files_renamed: usize,
    /// Files left alone because they matched their recorded fingerprint
    pub files_skipped: usize,
    /// Files that could not be synchronized
    pub files_failed: usize,
    /// Fingerprints recorded by a baseline pass
    pub files_recorded: usize,
    /// Destination directories created
    pub dirs_created: usize,
    /// Aggregate copied bytes
    pub bytes_copied: u64,
    /// Configured source roots that were missing and skipped
    pub roots_skipped: usize,
}

impl RunSummary {
    /// Fold another summary's counters into this one
    pub fn merge(&mut self, other: &RunSummary) {
        self.files_copied += other.files_copied;
        self.files_renamed += other.files_renamed;
        self.files_skipped += other.files_skipped;
        self.files_failed += other.files_failed;
        self.files_recorded += other.files_recorded;
        self.dirs_created += other.dirs_created;
        self.bytes_copied += other.bytes_copied;
        self.roots_skipped += other.roots_skipped;
    }

    /// Check if any per-file failures or skipped roots were recorded
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0 || self.roots_skipped > 0
    }
}

/// Run one full synchronization pass.
///
/// Each configured source root is mirrored into
/// `destination_root/basename(root)`. Missing roots are reported and
/// skipped; the remaining roots still run. The snapshot is loaded once up
/// front (empty when absent) and persisted exactly once at the end, so a
/// crash mid-run leaves it at its pre-run state.
///
/// # Errors
/// * `SyncError::Config` - no source roots or no destination configured
/// * `SyncError::Snapshot` / `SyncError::Io` - the snapshot could not be
///   loaded or persisted
pub fn run(
    config: &SyncConfiguration,
    snapshot_path: &Path,
    sink: &mut dyn EventSink,
) -> Result<RunSummary, SyncError> {
    config.validate()?;

    let mut snapshot = SnapshotStore::load(snapshot_path)?;
    let mut summary = RunSummary::default();

    for root in &config.source_roots {
        if !root.is_dir() {
            sink.emit(&SyncEvent::SourceMissing { root: root.clone() });
            summary.roots_skipped += 1;
            continue;
        }

        let name = match root.file_name() {
            Some(name) => name,
            None => {
                sink.emit(&SyncEvent::SourceMissing { root: root.clone() });
                summary.roots_skipped += 1;
                continue;
            }
        };

        let destination = config.destination_root.join(name);
        let mut reconciler = Reconciler::new(&mut snapshot, sink);
        reconciler.reconcile(root, &destination);
        summary.merge(&reconciler.into_summary());
    }

    snapshot.save(snapshot_path)?;
    Ok(summary)
}

/// Populate a fresh snapshot from the source trees without copying anything.
///
/// Used to adopt an already-synchronized destination as the new reference
/// point: every file under every source root is fingerprinted (with content
/// hash, so later rename detection has digests to match against) and the
/// resulting snapshot replaces whatever was on disk. The destination is
/// never touched.
pub fn baseline(
    config: &SyncConfiguration,
    snapshot_path: &Path,
    sink: &mut dyn EventSink,
) -> Result<RunSummary, SyncError> {
    config.validate()?;

    let mut snapshot = SnapshotStore::new();
    let mut summary = RunSummary::default();

    for root in &config.source_roots {
        if !root.is_dir() {
            sink.emit(&SyncEvent::SourceMissing { root: root.clone() });
            summary.roots_skipped += 1;
            continue;
        }

        record_tree(root, &mut snapshot, sink, &mut summary);
    }

    snapshot.save(snapshot_path)?;
    Ok(summary)
}

/// Offload a full synchronization run onto a blocking worker.
///
/// The run executes as one unit; the caller decides how to await or poll the
/// returned handle. Callers must not start a second run against the same
/// snapshot or destination while one is in flight.
pub fn spawn<S>(
    config: SyncConfiguration,
    snapshot_path: PathBuf,
    mut sink: S,
) -> tokio::task::JoinHandle<Result<RunSummary, SyncError>>
where
    S: EventSink + Send + 'static,
{
    tokio::task::spawn_blocking(move || run(&config, &snapshot_path, &mut sink))
}

fn record_tree(
    root: &Path,
    snapshot: &mut SnapshotStore,
    sink: &mut dyn EventSink,
    summary: &mut RunSummary,
) {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(iter) => iter,
            Err(e) => {
                sink.emit(&SyncEvent::ReadFailed {
                    path: dir.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    sink.emit(&SyncEvent::ReadFailed {
                        path: dir.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                match FileFingerprint::capture(&path) {
                    Ok(fingerprint) => {
                        snapshot.record(&path, fingerprint);
                        summary.files_recorded += 1;
                    }
                    Err(e) => sink.emit(&SyncEvent::ReadFailed {
                        path,
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }
}
