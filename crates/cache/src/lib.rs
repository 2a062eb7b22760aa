#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cache` owns the two pieces of the build that make a second run of
//! `mkfrogfs` over an unchanged tree cheap: the JSON [`state`] document
//! (spec §4.4) and the [`orchestrator`] that compares it against the
//! current entry set to decide what needs re-running (spec §4.5).
//!
//! # Design
//!
//! The orchestrator never re-derives a file's bytes speculatively — it
//! either trusts the prior state and re-reads the cached artifact from
//! disk, or re-runs transforms and compression and writes a fresh one.
//! Staleness is evaluated per entry against six independent conditions
//! (global option changes, absence from prior state, a disabled cache
//! flag, a newer source mtime, and any change to the resolved transform
//! or compressor). Cleanup of cache artifacts whose source path no longer
//! exists runs before that comparison, since an orphan's removal forces a
//! re-run regardless of what the per-entry rules would otherwise decide.
//!
//! # Errors
//!
//! I/O and malformed-JSON failures are [`error::CacheError::Io`] /
//! [`error::CacheError::Json`]; failures from a transform or compressor
//! invoked during re-run propagate through as
//! [`error::CacheError::Transform`] / [`error::CacheError::Compress`], all
//! fatal per spec §7.

/// Compressor-argument resolution from the rule engine's generic mapping.
pub mod args;
/// Errors raised by the state store or the orchestrator.
pub mod error;
/// The incremental preprocess orchestrator.
pub mod orchestrator;
/// The persisted build-state document.
pub mod state;

pub use error::CacheError;
pub use orchestrator::{cleanup_orphans, preprocess, should_skip_image_rewrite, Outcome};
pub use state::{Options, PathState, State};
