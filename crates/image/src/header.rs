//! Object encoder (spec §4.8): produces the header-plus-path byte sequence
//! for a single entry. Offset-carrying fields (child offsets) are zeroed
//! here and patched in place by the assembler once layout is known.

use crate::entry::CompressionInfo;
use crate::format::{
    COMPRESSED_FILE_HEADER_LEN, COMPRESSION_NONE, DIR_HEADER_LEN, FILE_HEADER_LEN, TYPE_DIR,
    TYPE_FILE,
};
use crate::error::ImageError;

fn path_len_field(segment: &str) -> Result<u16, ImageError> {
    let len = segment.len() + 1; // + NUL terminator
    u16::try_from(len).map_err(|_| ImageError::PathTooLong {
        path: segment.to_owned(),
        len,
    })
}

/// Encodes a file entry's header-plus-name bytes.
///
/// `segment` is the entry's final path component (its basename), not its
/// full relative path — this matches `generate_file_header`'s use of
/// `ent['seg']` in the original image builder: an object only ever needs to
/// find itself by name within its parent directory's child list, never by
/// its full path.
///
/// `data_len` is the length of the bytes that will follow in the image
/// (post-compression if `compression.is_some()`). When `compression` is
/// `None` the uncompressed `<BBHIB>` variant is emitted; otherwise the
/// `<BBHIBBHI>` compressed variant, embedding `expanded_len`.
pub fn encode_file_header(
    segment: &str,
    data_len: u32,
    compression: Option<CompressionInfo>,
    expanded_len: u32,
) -> Result<Vec<u8>, ImageError> {
    let path_len = path_len_field(segment)?;
    let mut out = Vec::new();
    match compression {
        None => {
            out.reserve(FILE_HEADER_LEN + path_len as usize);
            out.push(FILE_HEADER_LEN as u8);
            out.push(TYPE_FILE);
            out.extend_from_slice(&path_len.to_le_bytes());
            out.extend_from_slice(&data_len.to_le_bytes());
            out.push(COMPRESSION_NONE);
        }
        Some(CompressionInfo { id, options }) => {
            out.reserve(COMPRESSED_FILE_HEADER_LEN + path_len as usize);
            out.push(COMPRESSED_FILE_HEADER_LEN as u8);
            out.push(TYPE_FILE);
            out.extend_from_slice(&path_len.to_le_bytes());
            out.extend_from_slice(&data_len.to_le_bytes());
            out.push(id);
            out.push(options);
            out.extend_from_slice(&0u16.to_le_bytes()); // reserved
            out.extend_from_slice(&expanded_len.to_le_bytes());
        }
    }
    write_path(&mut out, segment);
    Ok(out)
}

/// Encodes a directory entry's header-plus-children-plus-name bytes. The
/// `child_count` child offset slots are zeroed placeholders; the assembler
/// patches them via [`patch_child_offset`] once every child's
/// `header_offset` is known. `segment` is the directory's basename, per the
/// same `ent['seg']` convention as [`encode_file_header`].
pub fn encode_dir_header(segment: &str, child_count: u16) -> Result<Vec<u8>, ImageError> {
    let path_len = path_len_field(segment)?;
    let mut out = Vec::with_capacity(DIR_HEADER_LEN + 4 * child_count as usize + path_len as usize);
    out.push(DIR_HEADER_LEN as u8);
    out.push(TYPE_DIR);
    out.extend_from_slice(&path_len.to_le_bytes());
    out.extend_from_slice(&child_count.to_le_bytes());
    out.resize(out.len() + 4 * usize::from(child_count), 0);
    write_path(&mut out, segment);
    Ok(out)
}

fn write_path(out: &mut Vec<u8>, segment: &str) {
    out.extend_from_slice(segment.as_bytes());
    out.push(0);
}

/// Patches the `index`-th child offset slot of a directory's encoded header
/// bytes with `child_header_offset`. `index` is the position within
/// lexicographic child order, matching how [`encode_dir_header`] reserved
/// the slots.
pub fn patch_child_offset(header_bytes: &mut [u8], index: usize, child_header_offset: u32) {
    let start = DIR_HEADER_LEN + index * 4;
    header_bytes[start..start + 4].copy_from_slice(&child_header_offset.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_file_header_has_expected_prefix() {
        let bytes = encode_file_header("a.txt", 5, None, 0).unwrap();
        assert_eq!(bytes[0], FILE_HEADER_LEN as u8);
        assert_eq!(bytes[1], TYPE_FILE);
        let path_len = u16::from_le_bytes([bytes[2], bytes[3]]);
        assert_eq!(path_len, 6); // "a.txt\0"
        let data_len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(data_len, 5);
        assert_eq!(bytes[8], COMPRESSION_NONE);
        assert_eq!(&bytes[FILE_HEADER_LEN..], b"a.txt\0");
    }

    #[test]
    fn compressed_file_header_embeds_expanded_len() {
        let bytes = encode_file_header(
            "big.txt",
            10,
            Some(CompressionInfo { id: 1, options: 9 }),
            8192,
        )
        .unwrap();
        assert_eq!(bytes[0], COMPRESSED_FILE_HEADER_LEN as u8);
        assert_eq!(bytes[8], 1); // compressor id
        assert_eq!(bytes[9], 9); // options
        let expanded = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        assert_eq!(expanded, 8192);
    }

    #[test]
    fn dir_header_reserves_zeroed_child_slots() {
        let bytes = encode_dir_header("dir", 2).unwrap();
        assert_eq!(bytes[1], TYPE_DIR);
        let child_count = u16::from_le_bytes([bytes[4], bytes[5]]);
        assert_eq!(child_count, 2);
        assert_eq!(&bytes[DIR_HEADER_LEN..DIR_HEADER_LEN + 8], &[0u8; 8]);
        let path_start = DIR_HEADER_LEN + 8;
        assert_eq!(&bytes[path_start..], b"dir\0");
    }

    #[test]
    fn patch_child_offset_writes_in_place() {
        let mut bytes = encode_dir_header("dir", 1).unwrap();
        patch_child_offset(&mut bytes, 0, 0x1234_5678);
        let offset = u32::from_le_bytes([
            bytes[DIR_HEADER_LEN],
            bytes[DIR_HEADER_LEN + 1],
            bytes[DIR_HEADER_LEN + 2],
            bytes[DIR_HEADER_LEN + 3],
        ]);
        assert_eq!(offset, 0x1234_5678);
    }
}
