//! Driver-level tests: multi-root runs, baseline passes, snapshot
//! persistence, and configuration validation.

use mirra::events::SyncEvent;
use mirra::{MemorySink, SnapshotStore, SyncConfiguration, SyncError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    tmp: TempDir,
    config: SyncConfiguration,
    snapshot_path: PathBuf,
}

fn fixture_with_roots(roots: &[&str]) -> Fixture {
    let tmp = TempDir::new().expect("create tempdir");
    let mut source_roots = Vec::new();
    for root in roots {
        let path = tmp.path().join(root);
        fs::create_dir_all(&path).expect("create source root");
        source_roots.push(path);
    }

    let config = SyncConfiguration {
        source_roots,
        destination_root: tmp.path().join("backup"),
    };
    let snapshot_path = tmp.path().join("snapshot.json");

    Fixture {
        tmp,
        config,
        snapshot_path,
    }
}

#[test]
fn test_each_root_lands_under_its_basename() {
    let fx = fixture_with_roots(&["documents", "pictures"]);
    fs::write(fx.config.source_roots[0].join("a.txt"), b"docs").expect("write docs file");
    fs::write(fx.config.source_roots[1].join("b.txt"), b"pics").expect("write pics file");

    let mut sink = MemorySink::new();
    let summary =
        mirra::driver::run(&fx.config, &fx.snapshot_path, &mut sink).expect("run succeeds");

    assert_eq!(summary.files_copied, 2);
    assert_eq!(
        fs::read(fx.tmp.path().join("backup/documents/a.txt")).expect("read docs copy"),
        b"docs"
    );
    assert_eq!(
        fs::read(fx.tmp.path().join("backup/pictures/b.txt")).expect("read pics copy"),
        b"pics"
    );
}

#[test]
fn test_missing_root_is_skipped_and_reported() {
    let mut fx = fixture_with_roots(&["present"]);
    fs::write(fx.config.source_roots[0].join("keep.txt"), b"kept").expect("write file");
    fx.config
        .source_roots
        .insert(0, fx.tmp.path().join("never-created"));

    let mut sink = MemorySink::new();
    let summary =
        mirra::driver::run(&fx.config, &fx.snapshot_path, &mut sink).expect("run succeeds");

    assert_eq!(summary.roots_skipped, 1);
    assert_eq!(summary.files_copied, 1);
    assert_eq!(
        sink.count_where(|e| matches!(e, SyncEvent::SourceMissing { .. })),
        1
    );
    assert!(fx.tmp.path().join("backup/present/keep.txt").exists());
}

#[test]
fn test_snapshot_is_persisted_at_end_of_run() {
    let fx = fixture_with_roots(&["data"]);
    fs::write(fx.config.source_roots[0].join("one.txt"), b"1").expect("write file");
    fs::write(fx.config.source_roots[0].join("two.txt"), b"22").expect("write file");

    let mut sink = MemorySink::new();
    mirra::driver::run(&fx.config, &fx.snapshot_path, &mut sink).expect("run succeeds");

    let store = SnapshotStore::load(&fx.snapshot_path).expect("load persisted snapshot");
    assert_eq!(store.len(), 2);
    assert!(store.contains(&fx.config.source_roots[0].join("one.txt")));

    let entry = store
        .get(&fx.config.source_roots[0].join("two.txt"))
        .expect("entry for two.txt");
    assert_eq!(entry.size, 2);
    assert!(entry.has_hash(), "confirmed copies are recorded with a hash");
}

#[test]
fn test_second_driver_run_reuses_persisted_snapshot() {
    let fx = fixture_with_roots(&["data"]);
    fs::write(fx.config.source_roots[0].join("same.txt"), b"stable").expect("write file");

    let mut first_sink = MemorySink::new();
    mirra::driver::run(&fx.config, &fx.snapshot_path, &mut first_sink).expect("first run");

    let mut second_sink = MemorySink::new();
    let summary =
        mirra::driver::run(&fx.config, &fx.snapshot_path, &mut second_sink).expect("second run");

    assert_eq!(summary.files_copied, 0);
    assert_eq!(summary.files_skipped, 1);
}

#[test]
fn test_baseline_records_everything_and_writes_nothing() {
    let fx = fixture_with_roots(&["data"]);
    let root = &fx.config.source_roots[0];
    fs::create_dir_all(root.join("deep/deeper")).expect("create nested dirs");
    fs::write(root.join("a.txt"), b"a").expect("write a");
    fs::write(root.join("deep/b.txt"), b"bb").expect("write b");
    fs::write(root.join("deep/deeper/c.txt"), b"ccc").expect("write c");

    let mut sink = MemorySink::new();
    let summary =
        mirra::driver::baseline(&fx.config, &fx.snapshot_path, &mut sink).expect("baseline");

    assert_eq!(summary.files_recorded, 3);
    assert_eq!(summary.files_copied, 0);
    assert!(
        !fx.config.destination_root.exists(),
        "baseline must not touch the destination"
    );

    let store = SnapshotStore::load(&fx.snapshot_path).expect("load snapshot");
    assert_eq!(store.len(), 3);
    assert!(store
        .get(&root.join("deep/deeper/c.txt"))
        .expect("entry for c.txt")
        .has_hash());
}

#[test]
fn test_baseline_then_sync_skips_identical_destination() {
    let fx = fixture_with_roots(&["data"]);
    let root = &fx.config.source_roots[0];
    fs::write(root.join("adopted.txt"), b"already there").expect("write source file");

    // Destination already holds an identical copy from outside mirra.
    let dest_dir = fx.tmp.path().join("backup/data");
    fs::create_dir_all(&dest_dir).expect("create dest dir");
    fs::write(dest_dir.join("adopted.txt"), b"already there").expect("write dest file");

    let mut baseline_sink = MemorySink::new();
    mirra::driver::baseline(&fx.config, &fx.snapshot_path, &mut baseline_sink)
        .expect("baseline");

    let mut sync_sink = MemorySink::new();
    let summary =
        mirra::driver::run(&fx.config, &fx.snapshot_path, &mut sync_sink).expect("sync");

    assert_eq!(summary.files_copied, 0);
    assert_eq!(summary.files_skipped, 1);
}

#[test]
fn test_baseline_replaces_previous_snapshot() {
    let fx = fixture_with_roots(&["data"]);
    let root = &fx.config.source_roots[0];
    fs::write(root.join("old.txt"), b"old").expect("write old file");

    let mut sink = MemorySink::new();
    mirra::driver::baseline(&fx.config, &fx.snapshot_path, &mut sink).expect("first baseline");

    fs::remove_file(root.join("old.txt")).expect("remove old file");
    fs::write(root.join("new.txt"), b"new").expect("write new file");

    let mut second_sink = MemorySink::new();
    mirra::driver::baseline(&fx.config, &fx.snapshot_path, &mut second_sink)
        .expect("second baseline");

    let store = SnapshotStore::load(&fx.snapshot_path).expect("load snapshot");
    assert_eq!(store.len(), 1);
    assert!(!store.contains(&root.join("old.txt")));
    assert!(store.contains(&root.join("new.txt")));
}

#[test]
fn test_run_rejects_empty_configuration() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = SyncConfiguration {
        source_roots: vec![],
        destination_root: tmp.path().join("backup"),
    };

    let mut sink = MemorySink::new();
    let result = mirra::driver::run(&config, &tmp.path().join("snapshot.json"), &mut sink);

    assert!(matches!(result.unwrap_err(), SyncError::Config(_)));
    assert!(
        !tmp.path().join("snapshot.json").exists(),
        "nothing may be touched when validation fails"
    );
    assert!(sink.events.is_empty());
}

#[test]
fn test_run_propagates_corrupt_snapshot() {
    let fx = fixture_with_roots(&["data"]);
    fs::write(&fx.snapshot_path, b"]]not json[[").expect("write corrupt snapshot");

    let mut sink = MemorySink::new();
    let result = mirra::driver::run(&fx.config, &fx.snapshot_path, &mut sink);

    assert!(matches!(result.unwrap_err(), SyncError::Snapshot(_)));
}

#[tokio::test]
async fn test_spawned_run_completes_on_worker() {
    let fx = fixture_with_roots(&["data"]);
    fs::write(fx.config.source_roots[0].join("bg.txt"), b"background").expect("write file");

    let handle = mirra::driver::spawn(
        fx.config.clone(),
        fx.snapshot_path.clone(),
        MemorySink::new(),
    );
    let summary = handle.await.expect("join worker").expect("run succeeds");

    assert_eq!(summary.files_copied, 1);
    assert!(fx.tmp.path().join("backup/data/bg.txt").exists());
}
