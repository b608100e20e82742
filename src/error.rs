//! Error taxonomy for session and persistence operations.
//!
//! Usage and validation errors abort the current command only. I/O and decode
//! errors are also returned to the prompt rather than ending the process, and
//! every operation that fails leaves the session exactly as it found it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by list, task, and configuration operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong argument count or shape for a command.
    #[error("Incorrect format: {0}")]
    Usage(String),

    /// Arguments had the right shape but an unacceptable value.
    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("No list file open: a list must be opened with \"opls <list-name>\" or created with \"mkls\" first")]
    NoActiveList,

    #[error("A task named '{0}' does not exist in this list. Use \"vwls\" to see the tasks you can pick from")]
    TaskNotFound(String),

    #[error("A list file already exists at {}", .0.display())]
    ListExists(PathBuf),

    #[error("Could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid file: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// Reading the command line or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Console(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Decode { path: path.into(), source }
    }

    /// Whether the failure came from the filesystem or a malformed file.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Decode { .. } | Error::Encode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
