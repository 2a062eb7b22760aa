//! Transform discovery and subprocess errors (spec §7: both are fatal for
//! the whole build).

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while discovering or running a `transform-<name>`
/// script.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No `transform-<name>.<ext>` file was found in any search directory.
    #[error("no transform script found for {name:?} (searched {searched:?})")]
    NotFound {
        /// The transform name from the filter rule.
        name: String,
        /// The directories searched, in order.
        searched: Vec<PathBuf>,
    },
    /// The script's routed interpreter (`python3`/`$PYTHON`, `node`) was
    /// not found on `PATH`.
    #[error("interpreter {interpreter:?} required by {script} was not found")]
    InterpreterMissing {
        /// The interpreter command that could not be located.
        interpreter: String,
        /// The script that required it.
        script: PathBuf,
    },
    /// The transform process exited with a non-zero status.
    #[error("transform {script} exited with status {code:?}")]
    NonZeroExit {
        /// The script that failed.
        script: PathBuf,
        /// Its exit code, if the process wasn't killed by a signal.
        code: Option<i32>,
    },
    /// Spawning the process, or writing to/reading from its pipes, failed.
    #[error("I/O error running transform {script}: {source}")]
    Io {
        /// The script being run when the error occurred.
        script: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
