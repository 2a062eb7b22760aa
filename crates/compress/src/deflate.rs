//! zlib-format deflate (spec §4.7): `level` ∈ `[0,9]`, default `9`.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::CompressError;

/// Arguments for the `deflate` compressor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeflateArgs {
    /// zlib compression level, `0..=9`.
    pub level: u8,
}

impl Default for DeflateArgs {
    fn default() -> Self {
        Self { level: 9 }
    }
}

impl DeflateArgs {
    /// Validates `level` falls within `0..=9`.
    pub fn validated(self) -> Result<Self, CompressError> {
        if self.level > 9 {
            return Err(CompressError::InvalidLevel(self.level));
        }
        Ok(self)
    }

    /// The on-disk `options` byte for a compressed file header: the zlib
    /// level itself.
    #[must_use]
    pub const fn options_byte(self) -> u8 {
        self.level
    }
}

/// Compresses `input` with zlib-format deflate at `args.level`.
pub fn compress(input: &[u8], args: DeflateArgs) -> Result<Vec<u8>, CompressError> {
    let args = args.validated()?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(u32::from(args.level)));
    encoder.write_all(input)?;
    Ok(encoder.finish()?)
}
