//! The compression accept/reject rule (spec §4.7): after compression, if
//! the result is not strictly smaller than the input, the plain bytes are
//! kept and the file is encoded without a compressor.

use crate::algorithm::Algorithm;
use crate::deflate::{self, DeflateArgs};
use crate::error::CompressError;
use crate::heatshrink::{self, HeatshrinkArgs};

/// Typed arguments for either built-in compressor, as resolved from an
/// entry's generic rule-engine argument mapping.
#[derive(Clone, Copy, Debug)]
pub enum CompressorArgs {
    /// Arguments for zlib-format deflate.
    Deflate(DeflateArgs),
    /// Arguments for the heatshrink LZSS variant.
    Heatshrink(HeatshrinkArgs),
}

impl CompressorArgs {
    /// The algorithm these arguments belong to.
    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Deflate(_) => Algorithm::Deflate,
            Self::Heatshrink(_) => Algorithm::Heatshrink,
        }
    }

    fn options_byte(self) -> u8 {
        match self {
            Self::Deflate(args) => args.options_byte(),
            Self::Heatshrink(args) => args.options_byte(),
        }
    }
}

/// The outcome of compressing one file's bytes.
#[derive(Debug, Clone)]
pub enum Selected {
    /// Compression was accepted: the compressed form was strictly smaller.
    Compressed {
        /// The compressor's id (spec §4.7).
        id: u8,
        /// The packed `options` byte for the compressed file header.
        options: u8,
        /// The compressed bytes.
        bytes: Vec<u8>,
        /// The pre-compression (post-transform) length.
        expanded_len: u32,
    },
    /// Compression was rejected: the plain, post-transform bytes.
    Plain(Vec<u8>),
}

/// Compresses `input` per `args` and applies the accept/reject rule.
pub fn select(args: CompressorArgs, input: &[u8]) -> Result<Selected, CompressError> {
    let algo = args.algorithm();
    let compressed = match args {
        CompressorArgs::Deflate(a) => deflate::compress(input, a)?,
        CompressorArgs::Heatshrink(a) => heatshrink::compress(input, a)?,
    };

    if compressed.len() < input.len() {
        Ok(Selected::Compressed {
            id: algo.id(),
            options: args.options_byte(),
            bytes: compressed,
            expanded_len: u32::try_from(input.len()).unwrap_or(u32::MAX),
        })
    } else {
        Ok(Selected::Plain(input.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_compressible_input() {
        let input = vec![b'a'; 8192];
        let selected = select(CompressorArgs::Deflate(DeflateArgs::default()), &input).unwrap();
        match selected {
            Selected::Compressed { expanded_len, bytes, .. } => {
                assert_eq!(expanded_len as usize, input.len());
                assert!(bytes.len() < input.len());
            }
            Selected::Plain(_) => panic!("expected compression to be accepted"),
        }
    }

    #[test]
    fn rejects_when_not_strictly_smaller() {
        let input: Vec<u8> = (0..16u32).map(|i| ((i * 131) % 251) as u8).collect();
        let selected = select(
            CompressorArgs::Heatshrink(HeatshrinkArgs::default()),
            &input,
        )
        .unwrap();
        match selected {
            Selected::Plain(bytes) => assert_eq!(bytes, input),
            Selected::Compressed { bytes, .. } => {
                assert!(bytes.len() < input.len(), "should only accept a strict reduction");
            }
        }
    }
}
