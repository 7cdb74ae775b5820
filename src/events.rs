//! Filesystem actions performed by the tracker.
//!
//! Every successful mkdir/write/unlink/rmdir is recorded as an [`FsEvent`]. Events
//! go to the `log` facade at TRACE on [`FS_TARGET`], and can be collected on the
//! current thread with [`capture`] to check ordering without a global logger.

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Log target for per-action filesystem events.
pub const FS_TARGET: &str = "temptrack::fs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEvent {
    Mkdir(PathBuf),
    Write(PathBuf),
    Unlink(PathBuf),
    Rmdir(PathBuf),
}

impl FsEvent {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            FsEvent::Mkdir(p) | FsEvent::Write(p) | FsEvent::Unlink(p) | FsEvent::Rmdir(p) => p,
        }
    }

    #[must_use]
    pub fn is_removal(&self) -> bool {
        matches!(self, FsEvent::Unlink(_) | FsEvent::Rmdir(_))
    }
}

impl fmt::Display for FsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            FsEvent::Mkdir(_) => "mkdir",
            FsEvent::Write(_) => "write",
            FsEvent::Unlink(_) => "unlink",
            FsEvent::Rmdir(_) => "rmdir",
        };
        write!(f, "{verb} {}", self.path().display())
    }
}

thread_local! {
    static CAPTURED: RefCell<Option<Vec<FsEvent>>> = const { RefCell::new(None) };
}

// Restores the enclosing capture (if any) even when the closure panics.
struct Restore(Option<Vec<FsEvent>>);

impl Drop for Restore {
    fn drop(&mut self) {
        let outer = self.0.take();
        CAPTURED.with(|c| *c.borrow_mut() = outer);
    }
}

pub(crate) fn record(event: FsEvent) {
    log::trace!(target: FS_TARGET, "{event}");
    CAPTURED.with(|c| {
        if let Some(events) = c.borrow_mut().as_mut() {
            events.push(event);
        }
    });
}

/// Run `f` and return its result together with every event it recorded on this
/// thread, in order. Nested captures each see only their own events.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<FsEvent>) {
    let outer = CAPTURED.with(|c| c.borrow_mut().replace(Vec::new()));
    let restore = Restore(outer);
    let out = f();
    let events = CAPTURED.with(|c| c.borrow_mut().take()).unwrap_or_default();
    drop(restore);
    (out, events)
}
