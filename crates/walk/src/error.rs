//! Errors raised while walking the source tree.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the path collector can raise.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Reading a directory entry or following a symlink failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path the failing operation was performed on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
