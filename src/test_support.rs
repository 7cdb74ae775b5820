#![cfg(test)]

// Tiny test-only helpers for scratch roots and log capture
use log::{Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;
use tempfile::TempDir;

/// Create a fresh, empty scratch directory to act as a tracker root.
/// Removed when the returned guard drops.
pub fn scratch_root() -> TempDir {
    tempfile::Builder::new().prefix("temptrack_").tempdir().expect("create scratch root failed")
}

thread_local! {
    static LINES: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

struct ThreadCapture;

impl Log for ThreadCapture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        LINES.with(|l| {
            if let Some(lines) = l.borrow_mut().as_mut() {
                lines.push((record.level(), record.args().to_string()));
            }
        });
    }
    fn flush(&self) {}
}

static CAPTURE: ThreadCapture = ThreadCapture;
static INSTALL: Once = Once::new();

/// Run `f` and return the log lines (level, message) it emitted on this thread.
/// Installs a process-wide capturing logger on first use.
pub fn captured_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INSTALL.call_once(|| {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
    });
    LINES.with(|l| *l.borrow_mut() = Some(Vec::new()));
    let out = f();
    let lines = LINES.with(|l| l.borrow_mut().take()).unwrap_or_default();
    (out, lines)
}
