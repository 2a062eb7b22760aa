#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `core` is the glue crate: [`context::BuildContext`] resolves the CLI
//! surface (spec §6.3) and environment (spec §6.4) into one struct, and
//! [`pipeline::run`] drives the rest of the workspace's crates through one
//! build in order — `walk` collects paths, `rules` resolves what happens to
//! each of them, `cache` decides what must be re-preprocessed and runs it,
//! and `image` lays out and emits the final bytes.
//!
//! # Design
//!
//! Every upstream crate's error type folds into one [`error::BuildError`],
//! and `main.rs` only ever has to match on [`error::BuildError::exit_code`]
//! to decide the process's exit status, the same separation of concerns
//! the teacher workspace's own `core::exit_code` module draws between
//! "what went wrong" and "what the process reports".
//!
//! # Errors
//!
//! See [`error::BuildError`] and spec §7's taxonomy.

/// The resolved build options a single run executes with.
pub mod context;
/// The unified build error type and its exit-code mapping.
pub mod error;
/// Process exit codes.
pub mod exit_code;
/// The pipeline driver.
pub mod pipeline;

pub use context::BuildContext;
pub use error::BuildError;
pub use exit_code::ExitCode;
pub use pipeline::{run, RunOutcome};
