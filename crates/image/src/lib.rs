#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `image` owns the FrogFS [`Entry`] data model and the two stages that turn
//! a finished set of entries into bytes: the per-entry object encoder
//! (spec §4.8) and the whole-image assembler (spec §4.9). Every other crate
//! in the workspace that needs to describe "a path in the image" — `walk`,
//! `rules`, `cache` — builds on the [`Entry`] type defined here rather than
//! each rolling its own.
//!
//! # Design
//!
//! `Entry` is a single struct whose fields are filled in progressively as
//! the pipeline runs: the path collector sets `path`/`segment`/`kind`/`hash`,
//! the rule engine sets `transforms`/`compressor`/`cache`/`discard`, the
//! preprocess orchestrator sets `data`/`compression`/`expanded_size`/`mtime`,
//! and finally [`assembler::assemble`] computes `children` and patches
//! `header_bytes`/`header_offset`/`data_offset`. This collapses the
//! "mutable pipeline entry vs. immutable prepared entry" split some variants
//! of this design use into one type, matching how spec.md §3 itself
//! describes a single `Entry` record with all of these attributes together.
//!
//! # Invariants
//!
//! - [`assembler::assemble`] only accepts entries already sorted
//!   lexicographically by `path` and already filtered of `discard`d entries;
//!   it does not re-sort or re-filter on their behalf.
//! - The hash table it emits is sorted by `(hash, path)`, and every
//!   `header_offset`/`data_offset` it assigns is a multiple of the
//!   configured alignment.

/// The [`Entry`] data model shared across the whole pipeline.
pub mod entry;
/// Errors raised while encoding headers or assembling the image.
pub mod error;
/// Fixed-width on-disk struct layouts (spec §6.1).
pub mod format;
/// Per-entry header encoding (spec §4.8).
pub mod header;
/// Whole-image layout and assembly (spec §4.9).
pub mod assembler;

pub use entry::{ArgMap, CompressionInfo, Entry, EntryKind};
pub use error::ImageError;
