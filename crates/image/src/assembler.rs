//! Image assembler (spec §4.9): lays out the header, hash table, and entry
//! records at fixed alignment, patches directory child offsets, and appends
//! the CRC-32 footer.

use hash::{align, crc32_ieee, padding_len};

use crate::entry::Entry;
use crate::error::ImageError;
use crate::format::{
    self, FLAG_DIRS, FOOTER_LEN, HASH_ENTRY_LEN, HEADER_LEN,
};
use crate::header::{encode_dir_header, encode_file_header, patch_child_offset};

/// Assembly-wide options, mirroring the CLI surface (spec §6.3).
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Power-of-two padding alignment, `1..=255`.
    pub align: u8,
    /// Whether directory entries are emitted (the `DIRS` flag, `--dirs`).
    pub include_dirs: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            align: 4,
            include_dirs: false,
        }
    }
}

fn parent_path(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(i) => Some(&path[..i]),
        None => Some(""),
    }
}

/// For every directory entry, populates `children` with the indices of its
/// direct descendants, in the (already lexicographically sorted) order they
/// appear in `entries`.
fn compute_children(entries: &mut [Entry]) -> Result<(), ImageError> {
    use std::collections::HashMap;

    let index_of_path: HashMap<&str, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.path.as_str(), i))
        .collect();

    let mut child_of: Vec<(usize, usize)> = Vec::new(); // (parent_idx, child_idx)
    for (i, e) in entries.iter().enumerate() {
        if let Some(parent) = parent_path(&e.path) {
            if let Some(&parent_idx) = index_of_path.get(parent) {
                child_of.push((parent_idx, i));
            }
        }
    }

    for (parent_idx, child_idx) in child_of {
        entries[parent_idx].children.push(child_idx);
    }

    for e in entries.iter() {
        if e.is_directory() && e.children.len() > usize::from(u16::MAX) {
            return Err(ImageError::TooManyChildren {
                path: e.path.clone(),
                count: e.children.len(),
            });
        }
    }
    Ok(())
}

/// Assembles a finalized binary image from `entries`.
///
/// `entries` must already be discard-filtered and sorted lexicographically
/// by `path` (the order the path collector and rule engine hand off); data,
/// `compression`, and `expanded_size` must already be populated by the
/// preprocess orchestrator. This function computes directory `children`,
/// encodes every header, lays out offsets, and returns the complete image
/// bytes including the trailing CRC-32 footer.
pub fn assemble(mut entries: Vec<Entry>, options: Options) -> Result<Vec<u8>, ImageError> {
    if !options.include_dirs {
        entries.retain(|e| !e.is_directory());
    }

    let num_entries = entries.len();
    if num_entries > usize::from(u16::MAX) {
        return Err(ImageError::TooManyEntries { count: num_entries });
    }

    if options.include_dirs {
        compute_children(&mut entries)?;
    }

    for i in 0..entries.len() {
        let data_len = u32::try_from(entries[i].data.len()).unwrap_or(u32::MAX);
        entries[i].data_size = data_len;
        let header_bytes = if entries[i].is_directory() {
            let child_count = u16::try_from(entries[i].children.len()).map_err(|_| {
                ImageError::TooManyChildren {
                    path: entries[i].path.clone(),
                    count: entries[i].children.len(),
                }
            })?;
            encode_dir_header(&entries[i].segment, child_count)?
        } else {
            let expanded_len = entries[i].expanded_size.unwrap_or(0);
            encode_file_header(&entries[i].segment, data_len, entries[i].compression, expanded_len)?
        };
        entries[i].header_bytes = header_bytes;
    }

    let a = options.align;
    let mut off = align(HEADER_LEN, a) + align(HASH_ENTRY_LEN * num_entries, a);

    for i in 0..entries.len() {
        entries[i].header_offset = u32::try_from(off).unwrap_or(u32::MAX);
        let header_len = entries[i].header_bytes.len();
        if entries[i].is_directory() {
            off = align(off + header_len, a);
            entries[i].data_offset = 0;
        } else {
            let data_offset = align(off + header_len, a);
            entries[i].data_offset = u32::try_from(data_offset).unwrap_or(u32::MAX);
            off = align(data_offset + entries[i].data.len(), a);
        }
    }

    for i in 0..entries.len() {
        if !entries[i].is_directory() {
            continue;
        }
        let children = entries[i].children.clone();
        for (slot, child_idx) in children.into_iter().enumerate() {
            let child_offset = entries[child_idx].header_offset;
            patch_child_offset(&mut entries[i].header_bytes, slot, child_offset);
        }
    }

    let binary_len = off + FOOTER_LEN;
    let flags = if options.include_dirs { FLAG_DIRS } else { 0 };

    let mut out = Vec::with_capacity(binary_len);
    format::write_header(&mut out, u32::try_from(binary_len).unwrap_or(u32::MAX), u16::try_from(num_entries).unwrap_or(u16::MAX), a, flags);
    out.resize(out.len() + padding_len(out.len(), a), 0);

    let mut hash_table: Vec<(u32, u32, &str)> = entries
        .iter()
        .map(|e| (e.hash, e.header_offset, e.path.as_str()))
        .collect();
    hash_table.sort_by(|x, y| x.0.cmp(&y.0).then_with(|| x.2.cmp(y.2)));
    for (h, o, _) in hash_table {
        format::write_hash_entry(&mut out, h, o);
    }
    out.resize(out.len() + padding_len(out.len(), a), 0);

    for e in &entries {
        out.extend_from_slice(&e.header_bytes);
        out.resize(out.len() + padding_len(out.len(), a), 0);
        if !e.is_directory() {
            out.extend_from_slice(&e.data);
            out.resize(out.len() + padding_len(out.len(), a), 0);
        }
    }

    debug_assert_eq!(out.len(), binary_len - FOOTER_LEN);
    let crc = crc32_ieee(&out);
    out.extend_from_slice(&crc.to_le_bytes());
    Ok(out)
}
