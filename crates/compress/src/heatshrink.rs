//! A from-scratch pure-Rust port of the heatshrink LZSS variant (spec
//! §4.7): `window` ∈ `[4,14]` (default `11`), `lookahead` ∈ `[3,13]`
//! (default `4`). Vendored in-tree because, unlike deflate, there is no
//! mainstream Rust crate for it — the same judgment call this corpus makes
//! for other small, single-consumer codecs.
//!
//! # Wire format
//!
//! A bit-packed stream, MSB first: each token starts with a one-bit tag —
//! `1` for a literal (followed by the raw byte, 8 bits), `0` for a backref
//! (followed by `window` bits encoding `distance - 1`, then `lookahead`
//! bits encoding `length - MIN_MATCH`). The minimum match length is 4
//! bytes; the final byte is zero-padded.

use crate::error::CompressError;

/// Minimum backref match length. Shorter runs are cheaper to encode as
/// literals than as a backref token.
const MIN_MATCH: usize = 4;

/// Arguments for the `heatshrink` compressor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeatshrinkArgs {
    /// `log2` of the sliding window size in bytes, `4..=14`.
    pub window: u8,
    /// `log2` of the maximum match length beyond [`MIN_MATCH`], `3..=13`.
    pub lookahead: u8,
}

impl Default for HeatshrinkArgs {
    fn default() -> Self {
        Self {
            window: 11,
            lookahead: 4,
        }
    }
}

impl HeatshrinkArgs {
    /// Validates `window` and `lookahead` fall within their documented
    /// ranges.
    pub fn validated(self) -> Result<Self, CompressError> {
        if !(4..=14).contains(&self.window) {
            return Err(CompressError::InvalidWindow(self.window));
        }
        if !(3..=13).contains(&self.lookahead) {
            return Err(CompressError::InvalidLookahead(self.lookahead));
        }
        Ok(self)
    }

    /// The on-disk `options` byte: `lookahead << 4 | window` (spec §6.1).
    #[must_use]
    pub const fn options_byte(self) -> u8 {
        (self.lookahead << 4) | self.window
    }

    /// Reconstructs `window`/`lookahead` from a stored `options` byte.
    #[must_use]
    pub const fn from_options_byte(options: u8) -> Self {
        Self {
            window: options & 0x0F,
            lookahead: (options >> 4) & 0x0F,
        }
    }
}

struct BitWriter {
    bytes: Vec<u8>,
    acc: u8,
    filled: u8,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            acc: 0,
            filled: 0,
        }
    }

    fn write_bit(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | u8::from(bit);
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.acc);
            self.acc = 0;
            self.filled = 0;
        }
    }

    fn write_bits(&mut self, value: u32, nbits: u8) {
        for i in (0..nbits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.acc <<= 8 - self.filled;
            self.bytes.push(self.acc);
        }
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    byte_idx: usize,
    bit_idx: u8,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            byte_idx: 0,
            bit_idx: 0,
        }
    }

    fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.byte_idx)?;
        let bit = (byte >> (7 - self.bit_idx)) & 1 == 1;
        self.bit_idx += 1;
        if self.bit_idx == 8 {
            self.bit_idx = 0;
            self.byte_idx += 1;
        }
        Some(bit)
    }

    fn read_bits(&mut self, nbits: u8) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..nbits {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Some(value)
    }
}

/// Compresses `input` with the heatshrink LZSS variant.
///
/// Uses a straightforward O(window × input) longest-match search; this is
/// a build-time tool, not an embedded encoder, so the reference
/// implementation's constant-memory hash-chain search is not needed here.
pub fn compress(input: &[u8], args: HeatshrinkArgs) -> Result<Vec<u8>, CompressError> {
    let args = args.validated()?;
    let max_window = 1usize << args.window;
    let max_len = MIN_MATCH + (1usize << args.lookahead) - 1;

    let mut writer = BitWriter::new();
    let n = input.len();
    let mut i = 0usize;
    while i < n {
        let window_start = i.saturating_sub(max_window);
        let max_possible = max_len.min(n - i);

        let mut best_len = 0usize;
        let mut best_dist = 0usize;
        if max_possible >= MIN_MATCH {
            for j in window_start..i {
                let mut len = 0usize;
                while len < max_possible && input[j + len] == input[i + len] {
                    len += 1;
                }
                if len >= MIN_MATCH && len > best_len {
                    best_len = len;
                    best_dist = i - j;
                }
            }
        }

        if best_len >= MIN_MATCH {
            writer.write_bit(false);
            writer.write_bits((best_dist - 1) as u32, args.window);
            writer.write_bits((best_len - MIN_MATCH) as u32, args.lookahead);
            i += best_len;
        } else {
            writer.write_bit(true);
            writer.write_bits(u32::from(input[i]), 8);
            i += 1;
        }
    }

    Ok(writer.finish())
}

/// Decompresses a heatshrink stream produced by [`compress`]. `expected_len`
/// is the known post-transform (pre-compression) length, taken from the
/// image's `expanded_len` field, and lets the decoder stop exactly at the
/// real payload boundary rather than misreading the final byte's zero
/// padding as another token.
#[must_use]
pub fn decompress(data: &[u8], args: HeatshrinkArgs, expected_len: usize) -> Vec<u8> {
    let mut reader = BitReader::new(data);
    let mut out = Vec::with_capacity(expected_len);

    while out.len() < expected_len {
        let Some(is_literal) = reader.read_bit() else {
            break;
        };
        if is_literal {
            let Some(byte) = reader.read_bits(8) else {
                break;
            };
            out.push(byte as u8);
        } else {
            let (Some(dist_m1), Some(len_m_min)) =
                (reader.read_bits(args.window), reader.read_bits(args.lookahead))
            else {
                break;
            };
            let dist = dist_m1 as usize + 1;
            let len = len_m_min as usize + MIN_MATCH;
            let start = out.len() - dist;
            for k in 0..len {
                let byte = out[start + k];
                out.push(byte);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_repetitive_data() {
        let input = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_vec();
        let args = HeatshrinkArgs::default();
        let compressed = compress(&input, args).unwrap();
        let decompressed = decompress(&compressed, args, input.len());
        assert_eq!(decompressed, input);
        assert!(compressed.len() < input.len());
    }

    #[test]
    fn round_trips_mixed_literal_and_backref_data() {
        let input = b"the quick brown fox the quick brown fox jumps over".to_vec();
        let args = HeatshrinkArgs {
            window: 8,
            lookahead: 4,
        };
        let compressed = compress(&input, args).unwrap();
        let decompressed = decompress(&compressed, args, input.len());
        assert_eq!(decompressed, input);
    }

    #[test]
    fn round_trips_empty_input() {
        let args = HeatshrinkArgs::default();
        let compressed = compress(b"", args).unwrap();
        assert!(compressed.is_empty());
        assert_eq!(decompress(&compressed, args, 0), Vec::<u8>::new());
    }

    #[test]
    fn options_byte_round_trips() {
        let args = HeatshrinkArgs {
            window: 11,
            lookahead: 4,
        };
        let packed = args.options_byte();
        assert_eq!(HeatshrinkArgs::from_options_byte(packed), args);
    }

    #[test]
    fn rejects_out_of_range_window() {
        let err = compress(b"x", HeatshrinkArgs { window: 3, lookahead: 4 }).unwrap_err();
        assert!(matches!(err, CompressError::InvalidWindow(3)));
    }

    #[test]
    fn rejects_out_of_range_lookahead() {
        let err = compress(b"x", HeatshrinkArgs { window: 8, lookahead: 14 }).unwrap_err();
        assert!(matches!(err, CompressError::InvalidLookahead(14)));
    }

    #[test]
    fn incompressible_random_like_data_still_round_trips() {
        let input: Vec<u8> = (0..64u32).map(|i| ((i * 2654435761) % 251) as u8).collect();
        let args = HeatshrinkArgs::default();
        let compressed = compress(&input, args).unwrap();
        let decompressed = decompress(&compressed, args, input.len());
        assert_eq!(decompressed, input);
    }
}
