#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Verbosity-gated structured logging shared by every crate in the build
//! pipeline.
//!
//! The original `mkfrogfs.py` narrates stage progress with plain
//! `print(..., file=sys.stderr)` calls; here that narration is
//! `tracing::info!`/`tracing::debug!` calls at the call sites, and this
//! crate's only job is installing the subscriber that decides which of
//! them reach the terminal.
//!
//! A single `-v` counter (spec §6.3) is the whole knob: no INFO/DEBUG
//! category taxonomy, just three levels.

use tracing_subscriber::EnvFilter;

/// Installs a [`tracing_subscriber`] formatter on stderr, with the level
/// derived from `verbosity`: `0` is `warn`, `1` is `info`, `2` or more is
/// `debug`. `RUST_LOG`, if set, overrides this mapping entirely.
pub fn init(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
