//! Codec errors (spec §7: a `CompressError` is fatal, it never triggers the
//! "skipped" recovery path — that path is the accept/reject rule in
//! [`crate::strategy`], which always succeeds).

use thiserror::Error;

/// Failures a compressor can raise.
#[derive(Debug, Error)]
pub enum CompressError {
    /// `deflate`'s `level` argument was outside `0..=9`.
    #[error("deflate level {0} is out of range 0..=9")]
    InvalidLevel(u8),
    /// `heatshrink`'s `window` argument was outside `4..=14`.
    #[error("heatshrink window {0} is out of range 4..=14")]
    InvalidWindow(u8),
    /// `heatshrink`'s `lookahead` argument was outside `3..=13`.
    #[error("heatshrink lookahead {0} is out of range 3..=13")]
    InvalidLookahead(u8),
    /// The underlying zlib stream failed.
    #[error("deflate stream error: {0}")]
    Io(#[from] std::io::Error),
}
