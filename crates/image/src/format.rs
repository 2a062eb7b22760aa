//! Fixed-width struct layouts for the FrogFS binary image.
//!
//! Every size in this module is the on-disk, little-endian byte width of the
//! corresponding struct in spec §6.1: `<IBBHIHBB>` for the image header,
//! `<II>` for a hash table entry, `<BBHIB>` / `<BBHIBBHI>` for an
//! uncompressed/compressed file header, `<BBHH>` for a directory header, and
//! `<I>` for the footer. This is the one true packing order; every encoder in
//! this crate writes fields in exactly this sequence.

/// `'FROG'`, little-endian, the canonical magic chosen over the historical
/// `0x73665345` / `0x2B534645` variants (spec §9 Open Questions).
pub const MAGIC: u32 = 0x4652_4F47;

/// Image format major version.
pub const VERSION_MAJOR: u8 = 1;
/// Image format minor version.
pub const VERSION_MINOR: u16 = 0;

/// `DIRS` flag bit: directory entries are present in the image.
pub const FLAG_DIRS: u8 = 0b0000_0001;

/// Size in bytes of the top-level image header (`<IBBHIHBB>`).
pub const HEADER_LEN: usize = 16;
/// Size in bytes of a single hash table entry (`<II>`).
pub const HASH_ENTRY_LEN: usize = 8;
/// Size in bytes of an uncompressed file header's fixed portion (`<BBHIB>`).
pub const FILE_HEADER_LEN: usize = 9;
/// Size in bytes of a compressed file header's fixed portion (`<BBHIBBHI>`).
pub const COMPRESSED_FILE_HEADER_LEN: usize = 16;
/// Size in bytes of a directory header's fixed portion, excluding the
/// trailing child offset array (`<BBHH>`).
pub const DIR_HEADER_LEN: usize = 6;
/// Size in bytes of the CRC-32 footer (`<I>`).
pub const FOOTER_LEN: usize = 4;

/// On-disk entry type tag: file.
pub const TYPE_FILE: u8 = 0;
/// On-disk entry type tag: directory.
pub const TYPE_DIR: u8 = 1;

/// On-disk compression tag: no compression.
pub const COMPRESSION_NONE: u8 = 0;

/// Writes the top-level image header.
#[allow(clippy::too_many_arguments)]
pub fn write_header(
    out: &mut Vec<u8>,
    binary_len: u32,
    num_objs: u16,
    align: u8,
    flags: u8,
) {
    out.extend_from_slice(&MAGIC.to_le_bytes());
    out.push(HEADER_LEN as u8);
    out.push(VERSION_MAJOR);
    out.extend_from_slice(&VERSION_MINOR.to_le_bytes());
    out.extend_from_slice(&binary_len.to_le_bytes());
    out.extend_from_slice(&num_objs.to_le_bytes());
    out.push(align);
    out.push(flags);
}

/// Writes one `(hash, offset)` hash table entry.
pub fn write_hash_entry(out: &mut Vec<u8>, hash: u32, offset: u32) {
    out.extend_from_slice(&hash.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes());
}
