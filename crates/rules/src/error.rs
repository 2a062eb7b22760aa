//! Configuration and rule-resolution errors (spec §7: all fatal, all
//! raised before any output is produced).

use thiserror::Error;

/// Failures raised while loading `default_config.yaml` or resolving its
/// filter table against the collected entry set.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read from disk.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The path that failed to open.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid YAML, or does not match the
    /// expected `filters: { pattern: [...] }` shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A glob pattern in the `filters` table could not be compiled.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        /// The offending pattern text.
        pattern: String,
        /// The underlying glob compilation error.
        #[source]
        source: globset::Error,
    },
    /// An action verb is not one of `cache`, `discard`, `compress`, or a
    /// transform name (every other token).
    #[error("unknown filter verb {verb:?} for pattern {pattern:?}")]
    UnknownVerb {
        /// The pattern the offending action was attached to.
        pattern: String,
        /// The unrecognized verb token.
        verb: String,
    },
    /// `compress <algo>` named an algorithm that is neither `deflate` nor
    /// `heatshrink`.
    #[error("unknown compressor {name:?} for pattern {pattern:?}")]
    UnknownCompressor {
        /// The pattern the offending action was attached to.
        pattern: String,
        /// The unrecognized compressor name.
        name: String,
    },
    /// `compress` was given with no algorithm name.
    #[error("compress action for pattern {pattern:?} is missing an algorithm name")]
    MissingCompressorName {
        /// The pattern the offending action was attached to.
        pattern: String,
    },
    /// The document parsed as YAML but `filters` (or one of its values) was
    /// not the expected shape.
    #[error("config has an invalid shape: {0}")]
    InvalidShape(String),
    /// A transform verb names a `transform-<name>` script that does not
    /// exist in any search directory. Checked unconditionally for every
    /// transform referenced anywhere in the filter table, independent of
    /// which entries end up matching it or whether those entries are
    /// discarded or cache-fresh.
    #[error("{name:?} is not a known transform")]
    UnknownTransform {
        /// The transform name referenced by a filter rule.
        name: String,
    },
}
