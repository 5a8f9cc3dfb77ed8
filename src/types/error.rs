//! Error types for treemirror

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A required path does not exist
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Permission denied reading the source or writing the destination
    #[error("Permission denied: {}", path.display())]
    Access { path: PathBuf },

    /// A tree root exists but is not a directory
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// A single file failed to copy
    #[error("Failed to copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration or command-line input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MirrorError {
    /// Classify an IO error raised while touching `path` at tree level
    ///
    /// `NotFound` and `PermissionDenied` get their own variants; anything
    /// else stays a plain IO error.
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => MirrorError::NotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::PermissionDenied => MirrorError::Access {
                path: path.to_path_buf(),
            },
            _ => MirrorError::Io(error),
        }
    }

    /// Classify an IO error raised while copying one file
    pub fn from_copy(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::PermissionDenied => MirrorError::Access {
                path: path.to_path_buf(),
            },
            _ => MirrorError::Copy {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
