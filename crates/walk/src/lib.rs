#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` collects the ordered set of [`image::Entry`] values that make up
//! a FrogFS build: one recursive pass over the source tree (spec §4.3),
//! following symlinks, producing a deterministic pre-sort that every later
//! stage relies on.
//!
//! # Design
//!
//! Traversal is hand-rolled recursion over `std::fs::read_dir` rather than
//! a crate like `walkdir`: the spec requires a final lexicographic sort by
//! `path` before rule application regardless of the order the OS returns
//! directory entries in, so a traversal-order guarantee buys nothing here
//! and the collector sorts unconditionally at the end anyway.
//!
//! # Errors
//!
//! Any I/O failure while reading a directory or resolving a symlink is
//! fatal and surfaced as [`WalkError`].

mod collect;
/// Errors raised while walking the source tree.
pub mod error;

pub use collect::collect;
pub use error::WalkError;
