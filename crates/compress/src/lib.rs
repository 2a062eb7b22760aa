#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` implements both compressors the FrogFS image format
//! recognizes (spec §4.7): zlib-format [`deflate`] and a vendored,
//! pure-Rust [`heatshrink`] LZSS port, plus the accept/reject [`strategy`]
//! that decides whether a compressed file is worth keeping.
//!
//! # Design
//!
//! Both codecs run in-process rather than shelling out, per the design
//! notes' stated preference for the two built-ins (spec §9). `deflate`
//! reuses [`flate2`](https://docs.rs/flate2), the same crate family the
//! teacher workspace already depends on for its own zlib strategy;
//! `heatshrink` has no mainstream Rust crate, so it is vendored in-tree as
//! a small, self-contained LZSS codec the way this corpus vendors other
//! tightly-scoped, single-consumer codecs.
//!
//! Since exactly two algorithms exist and neither is pluggable at runtime,
//! dispatch is a closed [`strategy::CompressorArgs`] enum matched in
//! [`strategy::select`] rather than a `dyn Compressor` trait object — there
//! is no open extension point here to justify the indirection.
//!
//! # Errors
//!
//! Out-of-range arguments (`deflate` level, `heatshrink` window/lookahead)
//! and zlib stream failures are both [`error::CompressError`], fatal per
//! spec §7. The accept/reject decision in [`strategy::select`] is never an
//! error — it is the "recovered" path spec §7 describes ("skipped").

/// The two recognized compressor identities.
pub mod algorithm;
/// zlib-format deflate.
pub mod deflate;
/// Errors raised by either codec.
pub mod error;
/// The vendored heatshrink LZSS codec.
pub mod heatshrink;
/// The accept/reject compression strategy.
pub mod strategy;

pub use algorithm::Algorithm;
pub use deflate::DeflateArgs;
pub use error::CompressError;
pub use heatshrink::HeatshrinkArgs;
pub use strategy::{select, CompressorArgs, Selected};
