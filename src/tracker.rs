//! Temp path tracker.
//!
//! Creates directories and files below a fixed root on behalf of a test, records
//! every path it creates or walks, and removes all of them again in
//! [`TempPathTracker::teardown`]: files first, then directories deepest first.
//!
//! ```no_run
//! use temptrack::TempPathTracker;
//!
//! # fn main() -> temptrack::Result<()> {
//! let mut tmp = TempPathTracker::from_env()?;
//! let cfg = tmp.create_file("conf/app.toml", "debug = true\n")?;
//! assert!(cfg.exists());
//! tmp.teardown()?;
//! # Ok(())
//! # }
//! ```

use crate::config::TrackerConfig;
use crate::errors::{FsOp, Result, TrackerError};
use crate::events::{self, FsEvent};
use crate::fsutil;
use crate::logger::AUDIT_TARGET;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Tracks temp directories and files created below a root for a single test.
///
/// Not meant to be shared: every operation takes `&mut self`, and teardown should
/// be called exactly once. Dropping the tracker does not clean anything up.
#[derive(Debug)]
pub struct TempPathTracker {
    root: PathBuf,
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl TempPathTracker {
    /// The root is not validated; the first creation fails if it is unusable.
    pub fn new(config: TrackerConfig) -> Self {
        Self { root: config.root, dirs: Vec::new(), files: Vec::new() }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(TrackerConfig::new(root))
    }

    /// Root taken from `TEST_TMPDIR`.
    ///
    /// # Errors
    /// Returns `MissingRoot` if the variable is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TrackerConfig::from_env()?))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create `relative_path` below the root one level at a time.
    ///
    /// Every level walked is logged for teardown, including levels that already
    /// existed. `.` components are ignored. An empty path is a no-op that returns
    /// the root. `..` is rejected: `a/..` would name the root (or a level above it)
    /// and could never be removed.
    ///
    /// # Errors
    /// Returns `InvalidDirPath` for a path containing `..`, or an `Io` error if a
    /// missing level cannot be created.
    pub fn create_dir(&mut self, relative_path: impl AsRef<Path>) -> Result<PathBuf> {
        let relative_path = relative_path.as_ref();
        let components = fsutil::split_components(relative_path)
            .ok_or_else(|| TrackerError::InvalidDirPath(relative_path.to_path_buf()))?;
        let mut current = self.root.clone();
        for c in components {
            current.push(c);
            let created = fsutil::create_dir_level(&current)
                .map_err(|e| TrackerError::io(FsOp::CreateDir, &current, e))?;
            if created {
                debug!("created temp dir {}", current.display());
                events::record(FsEvent::Mkdir(current.clone()));
            }
            self.dirs.push(current.clone());
        }
        Ok(current)
    }

    /// Write `content` to `relative_path` below the root, creating parent
    /// directories first. Existing content is truncated. Pass `""` for an empty file.
    ///
    /// The path must end in a file name: a trailing separator or `.`, and any `..`
    /// component, are rejected rather than guessed at.
    ///
    /// # Errors
    /// Returns `InvalidFilePath` if the path has no file name, or an `Io` error if
    /// a parent directory or the file cannot be written.
    pub fn create_file(
        &mut self,
        relative_path: impl AsRef<Path>,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf> {
        let relative_path = relative_path.as_ref();
        let (parents, name) = fsutil::split_file_path(relative_path)
            .ok_or_else(|| TrackerError::InvalidFilePath(relative_path.to_path_buf()))?;
        let parent = self.create_dir(fsutil::join_all(Path::new(""), &parents))?;
        let filename = parent.join(name);
        let content = content.as_ref();
        fsutil::write_truncate(&filename, content)
            .map_err(|e| TrackerError::io(FsOp::WriteFile, &filename, e))?;
        debug!("created temp file {} ({} bytes)", filename.display(), content.len());
        events::record(FsEvent::Write(filename.clone()));
        self.files.push(filename.clone());
        Ok(filename)
    }

    /// Remove every tracked file, then every tracked directory deepest first.
    ///
    /// Stops at the first failure, leaving the remaining paths in place. The logs
    /// are kept, so calling this twice fails on the already-removed paths.
    ///
    /// # Errors
    /// Returns an `Io` error if a file is missing or a directory is missing or
    /// not empty.
    pub fn teardown(&mut self) -> Result<()> {
        let files = file_removal_order(&self.files);
        for f in &files {
            std::fs::remove_file(f).map_err(|e| removal_failed(FsOp::RemoveFile, f, e))?;
            debug!("removed temp file {}", f.display());
            events::record(FsEvent::Unlink(f.clone()));
        }
        let dirs = dir_removal_order(&self.dirs);
        for d in &dirs {
            std::fs::remove_dir(d).map_err(|e| removal_failed(FsOp::RemoveDir, d, e))?;
            debug!("removed temp dir {}", d.display());
            events::record(FsEvent::Rmdir(d.clone()));
        }
        info!(
            target: AUDIT_TARGET,
            "teardown of {}: removed {} files, {} directories",
            self.root.display(),
            files.len(),
            dirs.len()
        );
        Ok(())
    }
}

fn removal_failed(op: FsOp, path: &Path, e: std::io::Error) -> TrackerError {
    warn!(target: AUDIT_TARGET, "teardown aborted: failed to {op} {}: {e}", path.display());
    TrackerError::io(op, path, e)
}

fn file_removal_order(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut v = files.to_vec();
    v.sort();
    v.dedup();
    v
}

// Deepest first; reverse lexicographic among equal depth.
fn dir_removal_order(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut v = dirs.to_vec();
    v.sort();
    v.dedup();
    v.sort_by(|a, b| {
        let (da, db) = (a.components().count(), b.components().count());
        db.cmp(&da).then_with(|| b.cmp(a))
    });
    v
}
