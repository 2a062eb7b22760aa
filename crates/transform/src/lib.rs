#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `transform` locates and runs the external, user-supplied scripts a
//! filter rule can name as an arbitrary verb (spec §4.6): anything that
//! isn't `cache`, `discard`, or `compress` is looked up as
//! `transform-<name>.py` or `transform-<name>.js` and run as a filter over
//! the entry's bytes.
//!
//! # Design
//!
//! Discovery ([`discover::discover`]) and invocation ([`runner::ExternalTransform::run`])
//! are split so that a build can resolve every transform a rule set
//! references up front and fail fast on a missing script, rather than
//! discovering the gap mid-pipeline on whichever file happens to need it
//! first.
//!
//! Subprocesses are piped rather than given file paths, matching how the
//! rest of this workspace treats external tools as byte-stream filters.
//! Stdin is fed from a second thread to avoid the classic pipe deadlock
//! when a script's output is larger than its input.
//!
//! # Errors
//!
//! A missing script, a missing interpreter, a non-zero exit, and any pipe
//! I/O failure are all [`error::TransformError`], and per spec §7 all are
//! fatal for the whole build — there is no partial-success outcome for a
//! transform the way there is for compression's accept/reject rule.

/// Search-path script discovery.
pub mod discover;
/// Errors raised by discovery or invocation.
pub mod error;
/// Subprocess invocation and chaining.
pub mod runner;

pub use discover::{default_search_dirs, discover, ExternalTransform};
pub use error::TransformError;
pub use runner::{run_chain, TransformEnv};
