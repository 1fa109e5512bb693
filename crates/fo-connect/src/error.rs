// error.rs — Error types for connection option handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or reading connection options.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The options file could not be read.
    #[error("failed to read connection options at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The options file is not valid TOML or has the wrong shape.
    #[error("invalid connection options: {0}")]
    ParseFailed(#[from] toml::de::Error),
}
