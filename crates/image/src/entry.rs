//! The [`Entry`] data model (spec §3): one record per path, threaded
//! through the whole pipeline from collection to assembly.

use std::collections::BTreeMap;
use std::time::SystemTime;

/// Ordered argument mapping attached to a transform or compressor action.
/// A `None` value means the key was a bare flag (`--verbose`, no argument).
pub type ArgMap = BTreeMap<String, Option<String>>;

/// Whether an [`Entry`] is a directory or a file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EntryKind {
    /// A directory; its `children` field lists the entries nested beneath it.
    Directory,
    /// A regular file; carries preprocessed/compressed bytes in `data`.
    File,
}

/// Compressor id and on-disk parameters recorded once compression is
/// accepted (spec §4.7's accept/reject rule).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressionInfo {
    /// Compressor identifier assigned by the driver (spec §4.7).
    pub id: u8,
    /// Algorithm-specific packed options byte (e.g. zlib level, or
    /// `lookahead << 4 | window` for heatshrink).
    pub options: u8,
}

/// A single path in the source tree, annotated and mutated by each pipeline
/// stage in turn: collected by `walk`, annotated by `rules`, preprocessed by
/// `cache`, and finalized by `image`'s own encoder/assembler.
///
/// Fields are grouped by the stage that populates them; later stages only
/// ever add to an `Entry`, never invalidate what an earlier stage wrote.
#[derive(Clone, Debug)]
pub struct Entry {
    // --- populated by the path collector (walk) ---
    /// Forward-slash relative path from the source root; `""` for the root.
    pub path: String,
    /// Last path component (empty for the root directory).
    pub segment: String,
    /// Directory or file.
    pub kind: EntryKind,
    /// DJB2 hash of `path` (spec §4.1).
    pub hash: u32,

    // --- populated by the rule engine (rules) ---
    /// Ordered transform list; insertion order is execution order.
    pub transforms: Vec<(String, ArgMap)>,
    /// Resolved compressor choice, if any.
    pub compressor: Option<(String, ArgMap)>,
    /// Whether the preprocess cache may be reused for this entry.
    pub cache: bool,
    /// Whether this entry is excluded from the final image.
    pub discard: bool,

    // --- populated by the preprocess orchestrator (cache) ---
    /// Post-transform, pre-compression byte length, present only when
    /// compression was applied and accepted.
    pub expanded_size: Option<u32>,
    /// Modification time of the cached, post-preprocess artifact.
    pub mtime: Option<SystemTime>,
    /// Post-preprocess bytes: compressed if `compression.is_some()`,
    /// otherwise the plain post-transform bytes. Empty for directories.
    pub data: Vec<u8>,
    /// Compressor id/options recorded once compression was accepted.
    pub compression: Option<CompressionInfo>,

    // --- populated by the image assembler (image) ---
    /// Indices into the final ordered entry slice, directory only, in
    /// lexicographic child order.
    pub children: Vec<usize>,
    /// Encoded header bytes (fixed struct + child offsets/path), with
    /// offset fields still zeroed until the assembler patches them.
    pub header_bytes: Vec<u8>,
    /// Byte length of `data`, post-compression if compressed.
    pub data_size: u32,
    /// Absolute byte offset of this entry's header in the final image.
    pub header_offset: u32,
    /// Absolute byte offset of this entry's data, files only.
    pub data_offset: u32,
}

impl Entry {
    /// Creates a freshly collected directory entry with no rule annotations
    /// yet applied.
    #[must_use]
    pub fn new_directory(path: String, segment: String, hash: u32) -> Self {
        Self {
            path,
            segment,
            kind: EntryKind::Directory,
            hash,
            transforms: Vec::new(),
            compressor: None,
            cache: true,
            discard: false,
            expanded_size: None,
            mtime: None,
            data: Vec::new(),
            compression: None,
            children: Vec::new(),
            header_bytes: Vec::new(),
            data_size: 0,
            header_offset: 0,
            data_offset: 0,
        }
    }

    /// Creates a freshly collected file entry with no rule annotations yet
    /// applied.
    #[must_use]
    pub fn new_file(path: String, segment: String, hash: u32) -> Self {
        Self {
            kind: EntryKind::File,
            ..Self::new_directory(path, segment, hash)
        }
    }

    /// Whether this entry represents a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_has_no_rule_annotations() {
        let e = Entry::new_file("a/b.txt".into(), "b.txt".into(), 42);
        assert!(e.cache);
        assert!(!e.discard);
        assert!(e.transforms.is_empty());
        assert!(e.compressor.is_none());
        assert!(!e.is_directory());
    }

    #[test]
    fn new_directory_defaults_to_cached_and_kept() {
        let d = Entry::new_directory(String::new(), String::new(), 5381);
        assert!(d.is_directory());
        assert!(d.cache);
        assert!(!d.discard);
    }
}
