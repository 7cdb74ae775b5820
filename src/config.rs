//! Tracker configuration.
//!
//! The tracker never reads the environment itself; test bootstrap code resolves a
//! [`TrackerConfig`] here (explicit override, `TEST_TMPDIR`, or a TOML file) and
//! hands it to [`crate::tracker::TempPathTracker::new`].

use crate::errors::{Result, TrackerError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable supplying the default temp root.
pub const ROOT_ENV_VAR: &str = "TEST_TMPDIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    pub root: PathBuf,
}

impl TrackerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read the root from `TEST_TMPDIR`.
    ///
    /// # Errors
    /// Returns `MissingRoot` if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(ROOT_ENV_VAR, |k| std::env::var_os(k).map(PathBuf::from))
    }

    /// Resolve the root from `var` through an arbitrary lookup (the process env in
    /// production, a map in tests).
    ///
    /// # Errors
    /// Returns `MissingRoot` if the lookup yields nothing or an empty path.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        match lookup(var) {
            Some(p) if !p.as_os_str().is_empty() => Ok(Self::new(p)),
            _ => Err(TrackerError::MissingRoot(var.to_string())),
        }
    }

    /// Explicit override wins; otherwise fall back to `TEST_TMPDIR`.
    ///
    /// # Errors
    /// Returns `MissingRoot` if neither source provides a root.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        match explicit {
            Some(p) => Ok(Self::new(p)),
            None => Self::from_env(),
        }
    }

    /// Parse `root = "..."` from TOML text.
    ///
    /// # Errors
    /// Returns `Config` if the text is not valid TOML or lacks `root`.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str::<TrackerConfig>(s)?)
    }

    /// # Errors
    /// Returns `Config` if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }
}
