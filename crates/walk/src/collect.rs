//! The path collector (spec §4.3).

use std::fs;
use std::path::Path;

use hash::djb2_hash;
use image::Entry;
use tracing::debug;

use crate::error::WalkError;

/// Walks `root` (following symlinks) and returns every directory and file
/// beneath it as an [`Entry`], sorted lexicographically by `path`. The root
/// directory itself is always included as the entry with `path == ""`;
/// downstream stages decide whether directory entries survive into the
/// final image (spec §6.3's `--dirs` flag).
pub fn collect(root: &Path) -> Result<Vec<Entry>, WalkError> {
    let mut entries = vec![Entry::new_directory(
        String::new(),
        String::new(),
        djb2_hash(""),
    )];
    collect_dir(root, "", &mut entries)?;
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(count = entries.len(), "collected path entries");
    Ok(entries)
}

fn collect_dir(abs: &Path, rel: &str, out: &mut Vec<Entry>) -> Result<(), WalkError> {
    let read_dir = fs::read_dir(abs).map_err(|source| WalkError::Io {
        path: abs.to_path_buf(),
        source,
    })?;

    for item in read_dir {
        let item = item.map_err(|source| WalkError::Io {
            path: abs.to_path_buf(),
            source,
        })?;
        let child_abs = item.path();

        // `fs::metadata` (unlike `DirEntry::metadata`) follows symlinks, matching
        // `os.walk(..., followlinks=True)` in the original.
        let metadata = fs::metadata(&child_abs).map_err(|source| WalkError::Io {
            path: child_abs.clone(),
            source,
        })?;

        let segment = item.file_name().to_string_lossy().replace('\\', "/");
        let child_rel = if rel.is_empty() {
            segment.clone()
        } else {
            format!("{rel}/{segment}")
        };

        if metadata.is_dir() {
            out.push(Entry::new_directory(
                child_rel.clone(),
                segment,
                djb2_hash(&child_rel),
            ));
            collect_dir(&child_abs, &child_rel, out)?;
        } else {
            out.push(Entry::new_file(child_rel.clone(), segment, djb2_hash(&child_rel)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::collect;
    use std::fs;

    #[test]
    fn collects_root_plus_nested_tree_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/c.txt"), b"c").unwrap();

        let entries = collect(dir.path()).unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["", "a", "a/c.txt", "b.txt"]);
    }

    #[test]
    fn empty_tree_yields_only_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let entries = collect(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "");
    }

    #[test]
    fn hashes_match_djb2_of_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.txt"), b"x").unwrap();
        let entries = collect(dir.path()).unwrap();
        let file = entries.iter().find(|e| e.path == "x.txt").unwrap();
        assert_eq!(file.hash, hash::djb2_hash("x.txt"));
    }
}
