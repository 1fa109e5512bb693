// error.rs — Error types for the local filesystem connector.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during local filesystem connector operations.
#[derive(Debug, Error)]
pub enum LocalFsError {
    /// The connection options carry no `data_dir` item.
    #[error("no storage dir found in connection options")]
    MissingDataDir,

    /// The configured root does not exist or cannot be inspected.
    #[error("storage dir ({path}) not found: {source}")]
    DataDirNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configured root exists but is not a directory.
    #[error("storage dir ({path}) is not a directory")]
    DataDirNotDir { path: PathBuf },

    /// A connection option has a value the connector does not understand.
    #[error("invalid value '{value}' for connection option '{key}'")]
    InvalidOption { key: String, value: String },

    /// A caller path is empty, names the root, or climbs above it.
    #[error("invalid path: '{path}'")]
    InvalidPath { path: String },

    /// The copy-in source path is empty or degenerate.
    #[error("invalid source path: '{path}'")]
    InvalidSrcPath { path: String },

    /// The copy-in destination path is empty or degenerate.
    #[error("invalid destination path: '{path}'")]
    InvalidDstPath { path: String },

    /// Strict confinement found the path's real location outside the root.
    #[error("path '{path}' resolves outside the storage dir")]
    PathEscapesRoot { path: String },

    /// The copy-in source is empty.
    #[error("zero size: {path}")]
    ZeroSize { path: PathBuf },

    /// The copy-in source and destination are the same file.
    #[error("source {src} and destination {dst} are the same file")]
    SameFile { src: PathBuf, dst: PathBuf },

    /// Copy-in moved fewer or more bytes than the source held when opened.
    #[error("copied {copied} of {expected} bytes to {path}")]
    ShortCopy {
        path: PathBuf,
        expected: u64,
        copied: u64,
    },

    /// A native file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LocalFsError {
    /// The native error kind, for errors that came from the filesystem.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            LocalFsError::IoError { source, .. } | LocalFsError::DataDirNotFound { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }

    /// True for the path-validation family of errors.
    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            LocalFsError::InvalidPath { .. }
                | LocalFsError::InvalidSrcPath { .. }
                | LocalFsError::InvalidDstPath { .. }
                | LocalFsError::PathEscapesRoot { .. }
        )
    }
}

/// Map an `io::Error` at `path` into [`LocalFsError::IoError`].
pub(crate) fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> LocalFsError {
    let path = path.into();
    move |source| LocalFsError::IoError { path, source }
}
