use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The single-step filesystem action that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    WriteFile,
    RemoveFile,
    RemoveDir,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FsOp::CreateDir => "create directory",
            FsOp::WriteFile => "write file",
            FsOp::RemoveFile => "remove file",
            FsOp::RemoveDir => "remove directory",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("I/O error: failed to {op} {}: {source}", .path.display())]
    Io {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file path: {}", .0.display())]
    InvalidFilePath(PathBuf),

    #[error("Invalid directory path (contains `..`): {}", .0.display())]
    InvalidDirPath(PathBuf),

    #[error("Temp root not configured: {0} is not set")]
    MissingRoot(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl TrackerError {
    pub(crate) fn io(op: FsOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        TrackerError::Io { op, path: path.into(), source }
    }

    /// Kind of the underlying I/O failure, if this error came from the filesystem.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            TrackerError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(e: toml::de::Error) -> Self {
        TrackerError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
