//! The incremental preprocess orchestrator (spec §4.5): decides, per
//! entry, whether a cached artifact may be reused, and otherwise re-runs
//! transforms and compression and writes the result into the cache tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compress::select;
use image::{CompressionInfo, Entry, EntryKind};
use tracing::{debug, info};
use transform::{discover, run_chain, TransformEnv};

use crate::args::resolve_compressor;
use crate::error::CacheError;
use crate::state::{unix_seconds, Options, PathState, State};

/// Outcome of a [`preprocess`] pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outcome {
    /// Whether any entry was re-run (recompiled/recompressed) this pass,
    /// including forced re-runs caused by orphan cleanup.
    pub any_rerun: bool,
}

fn cache_path(cache_dir: &Path, entry_path: &str) -> PathBuf {
    if entry_path.is_empty() {
        cache_dir.to_path_buf()
    } else {
        cache_dir.join(entry_path)
    }
}

/// Deletes any cached artifact whose path is no longer present in
/// `entries` (spec §4.5 "Cleanup"). Returns whether anything was removed.
pub fn cleanup_orphans(cache_dir: &Path, entries: &[Entry]) -> Result<bool, CacheError> {
    if !cache_dir.is_dir() {
        return Ok(false);
    }

    let live: std::collections::BTreeSet<&str> = entries
        .iter()
        .filter(|e| !e.discard)
        .map(|e| e.path.as_str())
        .collect();
    let mut removed = false;
    remove_orphans_in(cache_dir, cache_dir, &live, &mut removed)?;
    Ok(removed)
}

fn remove_orphans_in(
    cache_dir: &Path,
    dir: &Path,
    live: &std::collections::BTreeSet<&str>,
    removed: &mut bool,
) -> Result<(), CacheError> {
    let read_dir = fs::read_dir(dir).map_err(|source| CacheError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for item in read_dir {
        let item = item.map_err(|source| CacheError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let abs = item.path();
        let rel = abs
            .strip_prefix(cache_dir)
            .unwrap_or(&abs)
            .to_string_lossy()
            .replace('\\', "/");

        let is_dir = abs.is_dir();
        if is_dir {
            remove_orphans_in(cache_dir, &abs, live, removed)?;
        }

        if !live.contains(rel.as_str()) {
            if is_dir {
                let _ = fs::remove_dir_all(&abs);
            } else {
                let _ = fs::remove_file(&abs);
            }
            *removed = true;
            debug!(path = %rel, "removed orphaned cache artifact");
        }
    }

    Ok(())
}

/// Whether `entry` must be re-run, per spec §4.5 rules 1–6.
fn is_stale(entry: &Entry, prior: Option<&PathState>, options_changed: bool, source_mtime: Option<u64>) -> bool {
    if options_changed {
        return true;
    }
    let Some(prior) = prior else {
        return true;
    };
    if !entry.cache {
        return true;
    }
    if entry.kind == EntryKind::File {
        if let (Some(source_mtime), Some(cached_mtime)) = (source_mtime, prior.mtime) {
            if source_mtime > cached_mtime {
                return true;
            }
        }
    }
    if entry.transforms != prior.transforms {
        return true;
    }
    entry.compressor != prior.compressor
}

/// Re-runs preprocessing for every stale entry and fills in `data`,
/// `compression`, `expanded_size`, and `mtime` for every surviving, kept
/// entry (stale or not) so the image assembler has bytes to encode.
///
/// `discard`ed entries are skipped entirely: no bytes are read, written,
/// or recorded for them.
pub fn preprocess(
    entries: &mut [Entry],
    root: &Path,
    cache_dir: &Path,
    prior: &State,
    options: Options,
    tool_dirs: &[PathBuf],
    env: &TransformEnv,
) -> Result<(Outcome, State), CacheError> {
    let options_changed = prior.options != Some(options);
    let orphans_removed = cleanup_orphans(cache_dir, entries)?;

    let mut next = State {
        options: Some(options),
        paths: std::collections::BTreeMap::new(),
    };
    let mut any_rerun = orphans_removed;

    for entry in entries.iter_mut() {
        if entry.discard {
            continue;
        }

        let prior_path_state = prior.paths.get(&entry.path);
        let source_mtime = if entry.kind == EntryKind::File {
            fs::metadata(root.join(&entry.path))
                .and_then(|m| m.modified())
                .ok()
                .map(unix_seconds)
        } else {
            None
        };

        let stale = is_stale(entry, prior_path_state, options_changed, source_mtime);
        let target = cache_path(cache_dir, &entry.path);

        if stale {
            any_rerun = true;
            run_one(entry, root, &target, tool_dirs, env)?;
        } else if entry.kind == EntryKind::File {
            restore_one(entry, prior_path_state, &target)?;
        } else {
            fs::create_dir_all(&target).map_err(|source| CacheError::Io {
                path: target.clone(),
                source,
            })?;
        }

        next.paths.insert(
            entry.path.clone(),
            PathState {
                kind: if entry.kind == EntryKind::Directory {
                    "directory"
                } else {
                    "file"
                }
                .to_owned(),
                transforms: entry.transforms.clone(),
                compressor: entry.compressor.clone(),
                expanded_size: entry.expanded_size,
                mtime: entry.mtime.map(unix_seconds),
            },
        );
    }

    info!(reran = any_rerun, "preprocess pass complete");
    Ok((Outcome { any_rerun }, next))
}

/// Whether the builder may skip rewriting the output image entirely (spec
/// §4.5 "Short-circuit"): both the state file and the output image must
/// already exist, the image must be newer than the state file, and this
/// pass must not have re-run anything.
#[must_use]
pub fn should_skip_image_rewrite(state_path: &Path, output_path: &Path, outcome: Outcome) -> bool {
    if outcome.any_rerun {
        return false;
    }
    let (Ok(state_meta), Ok(output_meta)) = (fs::metadata(state_path), fs::metadata(output_path)) else {
        return false;
    };
    let (Ok(state_mtime), Ok(output_mtime)) = (state_meta.modified(), output_meta.modified()) else {
        return false;
    };
    output_mtime >= state_mtime
}

fn run_one(
    entry: &mut Entry,
    root: &Path,
    target: &Path,
    tool_dirs: &[PathBuf],
    env: &TransformEnv,
) -> Result<(), CacheError> {
    if entry.kind == EntryKind::Directory {
        fs::create_dir_all(target).map_err(|source| CacheError::Io {
            path: target.to_path_buf(),
            source,
        })?;
        return Ok(());
    }

    let source_path = root.join(&entry.path);
    let bytes = fs::read(&source_path).map_err(|source| CacheError::Io {
        path: source_path.clone(),
        source,
    })?;

    let mut resolved = Vec::with_capacity(entry.transforms.len());
    for (name, args) in &entry.transforms {
        let found = discover(tool_dirs, name)?;
        resolved.push((found, args.clone()));
    }
    let transformed = run_chain(&resolved, env, &bytes)?;

    match &entry.compressor {
        Some((name, args)) => {
            let compressor_args = resolve_compressor(name, args)?;
            match select(compressor_args, &transformed)? {
                compress::Selected::Compressed {
                    id,
                    options,
                    bytes,
                    expanded_len,
                } => {
                    entry.data = bytes;
                    entry.compression = Some(CompressionInfo { id, options });
                    entry.expanded_size = Some(expanded_len);
                }
                compress::Selected::Plain(bytes) => {
                    entry.data = bytes;
                    entry.compression = None;
                    entry.expanded_size = None;
                }
            }
        }
        None => {
            entry.data = transformed;
            entry.compression = None;
            entry.expanded_size = None;
        }
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| CacheError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(target, &entry.data).map_err(|source| CacheError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    entry.mtime = fs::metadata(target)
        .and_then(|m| m.modified())
        .ok()
        .or(Some(SystemTime::now()));

    Ok(())
}

/// Loads a kept, non-stale file's bytes and derived compression metadata
/// back from the cache tree and the prior state record, without re-running
/// anything.
fn restore_one(entry: &mut Entry, prior: Option<&PathState>, target: &Path) -> Result<(), CacheError> {
    entry.data = fs::read(target).map_err(|source| CacheError::Io {
        path: target.to_path_buf(),
        source,
    })?;

    entry.expanded_size = prior.and_then(|p| p.expanded_size);
    entry.mtime = prior
        .and_then(|p| p.mtime)
        .map(|secs| std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs));

    entry.compression = match (&entry.compressor, entry.expanded_size) {
        (Some((name, args)), Some(_)) => {
            let compressor_args = resolve_compressor(name, args)?;
            let (id, options) = match compressor_args {
                compress::CompressorArgs::Deflate(a) => (compressor_args.algorithm().id(), a.options_byte()),
                compress::CompressorArgs::Heatshrink(a) => (compressor_args.algorithm().id(), a.options_byte()),
            };
            Some(CompressionInfo { id, options })
        }
        _ => None,
    };

    Ok(())
}
