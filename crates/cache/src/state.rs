//! The persisted build-state document (spec §4.4): a JSON file colocated
//! with the cache directory, recording the options a cache was built with
//! and, per path, enough of the rule-engine resolution to detect staleness
//! on the next run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use image::ArgMap;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Global build options recorded in the state file; a change to any of
/// these invalidates the whole cache (spec §4.5 rule 1).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// The entry alignment the image was last built with.
    pub align: u8,
    /// Whether directory entries were carried into the image.
    pub use_dirs: bool,
}

/// The resolved, persisted shape of a single path's rule-engine outcome,
/// mirroring the fields of [`image::Entry`] that staleness depends on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PathState {
    /// `"file"` or `"directory"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Ordered transform names and their arguments.
    pub transforms: Vec<(String, ArgMap)>,
    /// Resolved compressor name and its arguments, if any.
    pub compressor: Option<(String, ArgMap)>,
    /// Post-transform, pre-compression byte length, present only when
    /// compression was applied.
    pub expanded_size: Option<u32>,
    /// Modification time of the cached artifact, Unix seconds.
    pub mtime: Option<u64>,
}

/// The full state document: `{ "options": ..., "paths": { ... } }` (spec
/// §4.4).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct State {
    /// Global options this state was last built with, absent for a state
    /// file that predates any successful build.
    pub options: Option<Options>,
    /// Per-path resolution record, keyed by the entry's relative path.
    pub paths: BTreeMap<String, PathState>,
}

impl State {
    /// Loads a state document from `path`, returning the default (empty)
    /// state if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(CacheError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Serializes and writes the state document to `path`, matching the
    /// original's `json.dump(paths, f, indent=4)` formatting.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let file = fs::File::create(path).map_err(|source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Converts a [`std::time::SystemTime`] to Unix seconds, matching the
/// original's `os.path.getmtime` granularity.
#[must_use]
pub fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = State::load(&dir.path().join("nope-state.json")).unwrap();
        assert!(state.options.is_none());
        assert!(state.paths.is_empty());
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut state = State {
            options: Some(Options {
                align: 4,
                use_dirs: true,
            }),
            paths: BTreeMap::new(),
        };
        state.paths.insert(
            "a.txt".to_owned(),
            PathState {
                kind: "file".to_owned(),
                transforms: Vec::new(),
                compressor: None,
                expanded_size: None,
                mtime: Some(12345),
            },
        );
        state.save(&path).unwrap();

        let loaded = State::load(&path).unwrap();
        assert_eq!(loaded.options, state.options);
        assert_eq!(loaded.paths, state.paths);
    }
}
