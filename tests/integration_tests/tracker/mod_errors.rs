use std::fs;
use std::io;
use tempfile::tempdir;
use temptrack::{FsOp, TempPathTracker, TrackerError};

#[test]
fn second_teardown_is_fatal() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    tmp.create_file("a/b.txt", "b").unwrap();
    tmp.teardown().unwrap();
    match tmp.teardown() {
        Err(TrackerError::Io { op: FsOp::RemoveFile, source, .. }) => {
            assert_eq!(source.kind(), io::ErrorKind::NotFound)
        }
        other => panic!("expected RemoveFile NotFound, got {other:?}"),
    }
}

#[test]
fn second_teardown_with_only_dirs_is_fatal() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    tmp.create_dir("only/dirs").unwrap();
    tmp.teardown().unwrap();
    let err = tmp.teardown().unwrap_err();
    assert!(matches!(err, TrackerError::Io { op: FsOp::RemoveDir, .. }));
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
}

#[test]
fn file_removed_by_test_body_fails_teardown() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    let f = tmp.create_file("gone.txt", "").unwrap();
    fs::remove_file(&f).unwrap();
    let err = tmp.teardown().unwrap_err();
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
}

#[test]
fn untracked_file_in_tracked_dir_fails_teardown() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    let d = tmp.create_dir("d").unwrap();
    fs::write(d.join("stray"), "").unwrap();
    let err = tmp.teardown().unwrap_err();
    assert!(matches!(err, TrackerError::Io { op: FsOp::RemoveDir, ref path, .. } if *path == d));
}

#[test]
fn missing_root_fails_on_first_create() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path().join("nope"));
    let err = tmp.create_file("a/b.txt", "x").unwrap_err();
    assert!(matches!(err, TrackerError::Io { op: FsOp::CreateDir, .. }));
    assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
}

#[test]
fn file_where_dir_expected_fails() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    tmp.create_file("plain", "x").unwrap();
    // "plain" exists as a file, so it is treated as present; writing below it fails.
    let err = tmp.create_file("plain/child.txt", "y").unwrap_err();
    assert!(matches!(err, TrackerError::Io { op: FsOp::WriteFile, .. }));
}

#[test]
fn invalid_file_path_is_rejected() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    let err = tmp.create_file("", "x").unwrap_err();
    assert!(matches!(err, TrackerError::InvalidFilePath(_)));
    assert_eq!(err.io_kind(), None);
}

#[test]
fn error_display_names_operation_and_path() {
    let err = TrackerError::Io {
        op: FsOp::RemoveDir,
        path: "/tmp/x/a".into(),
        source: io::Error::new(io::ErrorKind::Other, "Directory not empty"),
    };
    assert_eq!(
        err.to_string(),
        "I/O error: failed to remove directory /tmp/x/a: Directory not empty"
    );
    assert_eq!(
        TrackerError::MissingRoot("TEST_TMPDIR".into()).to_string(),
        "Temp root not configured: TEST_TMPDIR is not set"
    );
}

#[test]
fn trailing_separator_file_is_rejected() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    let err = tmp.create_file("a/b/", "x").unwrap_err();
    assert!(matches!(err, TrackerError::InvalidFilePath(_)));
    assert!(!dir.path().join("a").exists());
}

#[test]
fn parent_dir_components_are_rejected() {
    let dir = tempdir().unwrap();
    let mut tmp = TempPathTracker::with_root(dir.path());
    let err = tmp.create_file("a/../b.txt", "x").unwrap_err();
    assert!(matches!(err, TrackerError::InvalidFilePath(_)));
    let err = tmp.create_dir("a/..").unwrap_err();
    assert_eq!(err.to_string(), "Invalid directory path (contains `..`): a/..");
    // nothing was logged, so teardown succeeds and leaves the root empty
    tmp.teardown().unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
