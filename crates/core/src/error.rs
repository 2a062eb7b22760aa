//! The top-level error enum (spec §7), unifying every crate's error type
//! and carrying the [`ExitCode`] it maps to.

use thiserror::Error;

use crate::exit_code::ExitCode;

/// Every way a build can fail, one variant per upstream crate error.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Config loading or rule resolution failed.
    #[error(transparent)]
    Config(#[from] rules::ConfigError),
    /// Walking the source tree failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),
    /// The preprocess cache or state store failed.
    #[error(transparent)]
    Cache(#[from] cache::CacheError),
    /// Encoding or assembling the image failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
    /// An I/O failure not otherwise wrapped by a more specific error (e.g.
    /// writing the final output file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// The exit code this error maps to, per spec §7's taxonomy.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::Config,
            Self::Walk(_) | Self::Io(_) => ExitCode::Io,
            Self::Cache(cache_error) => cache_exit_code(cache_error),
            Self::Image(_) => ExitCode::Io,
        }
    }
}

const fn cache_exit_code(error: &cache::CacheError) -> ExitCode {
    match error {
        cache::CacheError::Io { .. } | cache::CacheError::Json(_) => ExitCode::Io,
        cache::CacheError::UnknownCompressor { .. } => ExitCode::Config,
        cache::CacheError::Compress(_) => ExitCode::Subprocess,
        cache::CacheError::Transform(transform_error) => match transform_error {
            // An unknown transform name is a config mistake; the config
            // validation pass (`rules::validate_transforms`) should already
            // have caught this before the cache ever runs, but the mapping
            // itself belongs with the other unknown-name errors.
            transform::TransformError::NotFound { .. } => ExitCode::Config,
            transform::TransformError::InterpreterMissing { .. } => ExitCode::ToolDiscovery,
            transform::TransformError::NonZeroExit { .. } | transform::TransformError::Io { .. } => {
                ExitCode::Subprocess
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_transform_name_maps_to_config_exit_code() {
        let err = BuildError::Cache(cache::CacheError::Transform(transform::TransformError::NotFound {
            name: "minify".to_owned(),
            searched: Vec::new(),
        }));
        assert_eq!(err.exit_code(), ExitCode::Config);
    }

    #[test]
    fn missing_interpreter_maps_to_tool_discovery_exit_code() {
        let err = BuildError::Cache(cache::CacheError::Transform(transform::TransformError::InterpreterMissing {
            interpreter: "node".to_owned(),
            script: "transform-minify.js".to_owned(),
        }));
        assert_eq!(err.exit_code(), ExitCode::ToolDiscovery);
    }

    #[test]
    fn unknown_compressor_maps_to_config_exit_code() {
        let err = BuildError::Cache(cache::CacheError::UnknownCompressor {
            name: "lzma".to_owned(),
        });
        assert_eq!(err.exit_code(), ExitCode::Config);
    }
}
