//! Property tests for the whole-image assembler (spec §8 "Invariants").

use image::assembler::{assemble, Options};
use image::Entry;
use proptest::prelude::*;

fn entry_for(path: String, data: Vec<u8>) -> Entry {
    let segment = path.rsplit('/').next().unwrap_or(&path).to_owned();
    let mut e = Entry::new_file(path.clone(), segment, hash::djb2_hash(&path));
    e.data = data;
    e
}

/// Generates a small set of distinct, simple file paths with arbitrary byte
/// bodies, already pre-sorted the way the path collector hands them off.
fn arb_tree() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(("[a-z]{1,8}\\.txt", prop::collection::vec(any::<u8>(), 0..64)), 0..12).prop_map(
        |mut pairs| {
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            pairs.dedup_by(|a, b| a.0 == b.0);
            pairs.into_iter().map(|(path, data)| entry_for(path, data)).collect()
        },
    )
}

proptest! {
    #[test]
    fn crc_always_covers_every_byte_but_the_footer(entries in arb_tree(), align in prop::sample::select(vec![1u8, 2, 4, 8, 16])) {
        let bytes = assemble(entries, Options { align, include_dirs: false }).unwrap();
        let (body, footer) = bytes.split_at(bytes.len() - 4);
        prop_assert_eq!(hash::crc32_ieee(body), u32::from_le_bytes(footer.try_into().unwrap()));
    }

    #[test]
    fn binary_len_in_header_matches_actual_length(entries in arb_tree(), align in prop::sample::select(vec![1u8, 2, 4, 8, 16])) {
        let bytes = assemble(entries, Options { align, include_dirs: false }).unwrap();
        let binary_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        prop_assert_eq!(binary_len, bytes.len());
    }

    #[test]
    fn hash_table_entries_are_sorted_by_hash_then_path(entries in arb_tree(), align in prop::sample::select(vec![1u8, 2, 4, 8, 16])) {
        let num = entries.len();
        let bytes = assemble(entries, Options { align, include_dirs: false }).unwrap();
        let start = hash::align(image::format::HEADER_LEN, align);
        let mut hashes = Vec::with_capacity(num);
        for i in 0..num {
            let base = start + i * image::format::HASH_ENTRY_LEN;
            hashes.push(u32::from_le_bytes(bytes[base..base + 4].try_into().unwrap()));
        }
        let mut sorted = hashes.clone();
        sorted.sort_unstable();
        prop_assert_eq!(hashes, sorted);
    }

    #[test]
    fn every_header_and_data_offset_is_a_multiple_of_align(entries in arb_tree(), align in prop::sample::select(vec![1u8, 2, 4, 8, 16])) {
        let num = entries.len();
        let bytes = assemble(entries, Options { align, include_dirs: false }).unwrap();
        let start = hash::align(image::format::HEADER_LEN, align);
        for i in 0..num {
            let base = start + i * image::format::HASH_ENTRY_LEN;
            let offset = u32::from_le_bytes(bytes[base + 4..base + 8].try_into().unwrap());
            prop_assert_eq!(offset as usize % usize::from(align.max(1)), 0);
        }
    }

    #[test]
    fn assembling_the_same_tree_twice_is_byte_identical(entries in arb_tree()) {
        let a = assemble(entries.clone(), Options { align: 4, include_dirs: false }).unwrap();
        let b = assemble(entries, Options { align: 4, include_dirs: false }).unwrap();
        prop_assert_eq!(a, b);
    }
}
