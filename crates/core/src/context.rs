//! The resolved set of options a single build runs with (spec §6.3/§6.4).

use std::path::PathBuf;

/// Everything the pipeline driver needs to run one build, already resolved
/// from CLI flags and the environment.
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// The source tree to walk.
    pub root: PathBuf,
    /// The final image path.
    pub output: PathBuf,
    /// The filter rule config file, defaulting to `default_config.yaml`.
    pub config: PathBuf,
    /// Entry alignment, `1..=255`.
    pub align: u8,
    /// Whether directory entries are carried into the image.
    pub include_dirs: bool,
    /// `BUILD_DIR`, or the current working directory if unset (spec §6.4):
    /// where the cache directory and state file are colocated.
    pub build_dir: PathBuf,
    /// The tool directory searched for `transform-<name>` scripts, exported
    /// to child processes as `FROGFS_DIR`.
    pub tool_dir: PathBuf,
    /// Exported to child transform processes as `NODE_PREFIX`.
    pub node_prefix: Option<PathBuf>,
    /// Exported to child transform processes as `NODE_PATH`.
    pub node_path: Option<PathBuf>,
}

impl BuildContext {
    /// The output file's stem, used to name the colocated cache directory
    /// and state file (spec §6.5).
    #[must_use]
    pub fn output_stem(&self) -> String {
        self.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frogfs".to_owned())
    }

    /// `<build_dir>/<output-stem>-cache/`.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.build_dir.join(format!("{}-cache", self.output_stem()))
    }

    /// `<build_dir>/<output-stem>-state.json`.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}-state.json", self.output_stem()))
    }
}
