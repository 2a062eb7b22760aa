//! The pipeline driver: wires `walk` → `rules` → `cache` → `image` into
//! one build (spec §2, §4).

use std::fs;

use tempfile::NamedTempFile;
use tracing::{debug, info};
use transform::{default_search_dirs, TransformEnv};

use crate::context::BuildContext;
use crate::error::BuildError;

/// Outcome of a single [`run`]: whether the image was actually rewritten,
/// or the short-circuit (spec §4.5) left it untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunOutcome {
    /// The image was written (or overwritten).
    Rewrote,
    /// Nothing changed since the last build; the existing image was left
    /// in place untouched.
    UpToDate,
}

/// Runs one complete build per `ctx`.
pub fn run(ctx: &BuildContext) -> Result<RunOutcome, BuildError> {
    let table = rules::FilterTable::load(&ctx.config)?;
    debug!(rules = table.rules.len(), "loaded filter rules");

    let tool_dirs = default_search_dirs(&ctx.tool_dir);
    // Validated here, against the whole table, before entries are even
    // collected: an unknown transform name is a config error regardless of
    // whether any entry that would use it survives discard or cache reuse.
    rules::validate_transforms(&table, &tool_dirs)?;

    let mut entries = walk::collect(&ctx.root)?;
    info!(count = entries.len(), "collected source tree");
    rules::apply_to_entries(&table, &mut entries);

    let cache_dir = ctx.cache_dir();
    let state_path = ctx.state_path();
    fs::create_dir_all(&cache_dir).map_err(BuildError::Io)?;

    let prior = cache::State::load(&state_path)?;
    let options = cache::Options {
        align: ctx.align,
        use_dirs: ctx.include_dirs,
    };
    let env = TransformEnv {
        frogfs_dir: Some(ctx.tool_dir.clone()),
        node_prefix: ctx.node_prefix.clone(),
        node_path: ctx.node_path.clone(),
    };

    let (outcome, next_state) = cache::preprocess(&mut entries, &ctx.root, &cache_dir, &prior, options, &tool_dirs, &env)?;

    if cache::should_skip_image_rewrite(&state_path, &ctx.output, outcome) {
        info!("nothing to do, image is up to date");
        return Ok(RunOutcome::UpToDate);
    }

    entries.retain(|e| !e.discard);
    let assembled = image::assembler::assemble(
        entries,
        image::assembler::Options {
            align: ctx.align,
            include_dirs: ctx.include_dirs,
        },
    )?;

    // The state file is written before the image, not after: the
    // short-circuit rule only trusts a state file that is older than the
    // output, and swapping the order would make a rebuilt image look stale
    // again the moment its state file lands.
    if outcome.any_rerun {
        next_state.save(&state_path)?;
        debug!("wrote updated state file");
    }

    write_atomically(&ctx.output, &assembled)?;
    info!(bytes = assembled.len(), "wrote image");

    Ok(RunOutcome::Rewrote)
}

/// Writes `bytes` to `path` via a same-directory temp file and rename, so
/// the output is never left half-written on failure (spec §5).
fn write_atomically(path: &std::path::Path, bytes: &[u8]) -> Result<(), BuildError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| std::path::Path::new("."));
    fs::create_dir_all(dir).map_err(BuildError::Io)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(BuildError::Io)?;
    std::io::Write::write_all(&mut tmp, bytes).map_err(BuildError::Io)?;
    tmp.persist(path).map_err(|e| BuildError::Io(e.error))?;
    Ok(())
}
