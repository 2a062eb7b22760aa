//! Errors raised while loading/saving build state or re-running
//! preprocessing.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the state store or the preprocess orchestrator.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An I/O failure reading or writing the state file or a cached
    /// artifact.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being read or written when the error occurred.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The state document was not valid JSON, or didn't match the
    /// expected shape.
    #[error("malformed state file: {0}")]
    Json(#[from] serde_json::Error),
    /// An unknown compressor name was referenced by a resolved rule.
    #[error("unknown compressor {name:?}")]
    UnknownCompressor {
        /// The compressor name from the rule engine.
        name: String,
    },
    /// Running a compressor failed.
    #[error(transparent)]
    Compress(#[from] compress::CompressError),
    /// Discovering or running a transform failed.
    #[error(transparent)]
    Transform(#[from] transform::TransformError),
}
