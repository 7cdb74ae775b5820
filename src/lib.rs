//! Creates temporary files and directories for automated tests and removes them
//! all again with a single teardown call.

pub mod config;
pub mod errors;
pub mod events;
pub mod fsutil;
pub mod logger;
pub mod tracker;

mod test_support;

pub use crate::config::TrackerConfig;
pub use crate::errors::{FsOp, Result, TrackerError};
pub use crate::tracker::TempPathTracker;

