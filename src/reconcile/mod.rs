//! Tree reconciliation - makes one destination subtree match one source
//! subtree

pub mod copy;

use crate::detect::{find_renamed, needs_copy};
use crate::driver::RunSummary;
use crate::events::{EventSink, SyncEvent};
use crate::snapshot::SnapshotStore;
use crate::types::{FileFingerprint, Outcome, SyncError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use copy::copy_preserving;

/// Walks a source tree against a destination tree, copying new or changed
/// files, moving renamed ones, and recording confirmed fingerprints.
///
/// The walk is driven by an explicit work stack of `(sourceDir,
/// destinationDir)` pairs, so arbitrarily deep trees never risk call-stack
/// exhaustion. Per-file failures are converted to [`Outcome::Failed`] and
/// logged; only an uncreatable destination directory aborts anything, and
/// then only its own subtree.
pub struct Reconciler<'a> {
    snapshot: &'a mut SnapshotStore,
    sink: &'a mut dyn EventSink,
    summary: RunSummary,
}

impl<'a> Reconciler<'a> {
    pub fn new(snapshot: &'a mut SnapshotStore, sink: &'a mut dyn EventSink) -> Self {
        Self {
            snapshot,
            sink,
            summary: RunSummary::default(),
        }
    }

    /// Reconcile one source tree into one destination tree.
    ///
    /// Entries present only in the destination are not visited. Enumeration
    /// order follows the directory listing and is not guaranteed stable
    /// across platforms; correctness does not depend on it.
    pub fn reconcile(&mut self, source_dir: &Path, destination_dir: &Path) {
        let mut pending: Vec<(PathBuf, PathBuf)> =
            vec![(source_dir.to_path_buf(), destination_dir.to_path_buf())];

        while let Some((src_dir, dst_dir)) = pending.pop() {
            if !self.ensure_directory(&dst_dir) {
                continue;
            }

            let entries = match fs::read_dir(&src_dir) {
                Ok(iter) => iter,
                Err(e) => {
                    self.sink.emit(&SyncEvent::ReadFailed {
                        path: src_dir.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // Destination listing for rename detection, captured once per
            // directory the first time a source file is missing over there.
            let mut dest_names: Option<Vec<PathBuf>> = None;

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        self.sink.emit(&SyncEvent::ReadFailed {
                            path: src_dir.clone(),
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                let src_path = entry.path();
                let dst_path = dst_dir.join(entry.file_name());

                if src_path.is_dir() {
                    pending.push((src_path, dst_path));
                } else if src_path.is_file() {
                    if dest_names.is_none() && !dst_path.exists() {
                        dest_names = Some(list_entry_names(&dst_dir));
                    }
                    let names = dest_names.as_deref().unwrap_or(&[]);
                    let outcome = self.sync_file(&src_path, &dst_path, &dst_dir, names);
                    self.tally(&outcome);
                }
                // Sockets, devices, and dangling links are not visited.
            }
        }
    }

    /// Consume the reconciler and return the accumulated counters
    pub fn into_summary(self) -> RunSummary {
        self.summary
    }

    fn ensure_directory(&mut self, path: &Path) -> bool {
        if path.is_dir() {
            return true;
        }

        match fs::create_dir_all(path) {
            Ok(()) => {
                self.summary.dirs_created += 1;
                self.sink.emit(&SyncEvent::DirectoryCreated {
                    path: path.to_path_buf(),
                });
                true
            }
            Err(e) => {
                self.sink.emit(&SyncEvent::DirectoryFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    fn sync_file(
        &mut self,
        src: &Path,
        dst: &Path,
        dst_dir: &Path,
        dest_names: &[PathBuf],
    ) -> Outcome {
        match self.try_sync_file(src, dst, dst_dir, dest_names) {
            Ok(outcome) => outcome,
            Err(err) => {
                let reason = err.to_string();
                self.sink.emit(&SyncEvent::CopyFailed {
                    path: src.to_path_buf(),
                    reason: reason.clone(),
                });
                Outcome::Failed(reason)
            }
        }
    }

    fn try_sync_file(
        &mut self,
        src: &Path,
        dst: &Path,
        dst_dir: &Path,
        dest_names: &[PathBuf],
    ) -> Result<Outcome, SyncError> {
        if !dst.exists() {
            if let Some(previous) = find_renamed(src, dst_dir, dest_names, self.snapshot)? {
                fs::rename(&previous, dst)?;
                self.snapshot.record(src, FileFingerprint::capture(src)?);
                self.sink.emit(&SyncEvent::RenameDetected {
                    from: previous,
                    to: dst.to_path_buf(),
                });
                return Ok(Outcome::Renamed);
            }
        } else if !needs_copy(src, self.snapshot)? {
            self.sink.emit(&SyncEvent::SkippedIdentical {
                path: src.to_path_buf(),
            });
            return Ok(Outcome::Skipped);
        }

        self.sink.emit(&SyncEvent::Copying {
            source: src.to_path_buf(),
            dest: dst.to_path_buf(),
        });

        let started = Instant::now();
        let bytes = copy_preserving(src, dst)?;
        self.snapshot.record(src, FileFingerprint::capture(src)?);

        self.sink.emit(&SyncEvent::CopyFinished {
            source: src.to_path_buf(),
            dest: dst.to_path_buf(),
            seconds: started.elapsed().as_secs_f64(),
        });

        Ok(Outcome::Copied { bytes })
    }

    fn tally(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Copied { bytes } => {
                self.summary.files_copied += 1;
                self.summary.bytes_copied += *bytes;
            }
            Outcome::Renamed => self.summary.files_renamed += 1,
            Outcome::Skipped => self.summary.files_skipped += 1,
            Outcome::Failed(_) => self.summary.files_failed += 1,
        }
    }
}

fn list_entry_names(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| PathBuf::from(entry.file_name()))
            .collect(),
        Err(_) => Vec::new(),
    }
}
