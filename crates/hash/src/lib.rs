#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `hash` provides the three small, pure-function primitives every other
//! crate in the workspace builds on: the path hash used for the image's
//! O(1) lookup table, alignment padding, and the footer CRC-32.
//!
//! # Design
//!
//! Each primitive is intentionally a free function over `&[u8]`/`usize`
//! rather than a struct with configuration, mirroring how the original
//! `frogfs.py` helper module exposed `djb2_hash`, `align`, and `pad` as
//! bare module-level functions. There is no state to carry between calls.
//!
//! # Invariants
//!
//! - [`djb2_hash`] is stable across platforms and process runs: it only
//!   depends on the UTF-8 byte sequence of its input.
//! - [`align`] never returns a value smaller than its input.
//! - [`crc32_ieee`] matches the IEEE 802.3 polynomial, seeded `0xFFFFFFFF`,
//!   with the result's inverse applied — the same variant `zlib.crc32`
//!   computes, which the reader relies on bit-for-bit.

/// DJB2 hash of an entry's path, as used for the image's hash table.
pub mod djb2;
/// Alignment and zero-padding helpers shared by the encoder and assembler.
pub mod pad;

pub use djb2::djb2_hash;
pub use pad::{align, padding_len};

use crc32fast::Hasher;

/// Computes the IEEE 802.3 CRC-32 (reflected, init/final XOR `0xFFFFFFFF`)
/// over `data`, matching Python's `zlib.crc32`.
#[must_use]
pub fn crc32_ieee(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc32_of_empty_matches_zlib() {
        // zlib.crc32(b"") == 0
        assert_eq!(crc32_ieee(b""), 0);
    }

    #[test]
    fn crc32_of_known_string_matches_zlib() {
        // zlib.crc32(b"123456789") == 0xCBF43926
        assert_eq!(crc32_ieee(b"123456789"), 0xCBF4_3926);
    }
}
