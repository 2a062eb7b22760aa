#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` owns the [`args::Args`] clap-derive surface and [`run`], which
//! turns parsed arguments plus the process environment into a
//! [`core::BuildContext`], runs the build, and narrates the outcome at
//! `info` level.
//!
//! `main.rs` itself stays a thin shim: it calls [`run`] and converts the
//! result into a process exit code, mirroring how the teacher workspace's
//! own `frontend` module keeps exit-code translation out of argument
//! parsing.

/// The clap-derive argument struct.
pub mod args;

use std::env;
use std::path::PathBuf;

use tracing::info;

pub use args::Args;
use core::{BuildError, ExitCode, RunOutcome};

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().map(PathBuf::from)
}

/// Builds a [`core::BuildContext`] from parsed `args` and the process
/// environment (spec §6.4).
///
/// `FROGFS_DIR`/`NODE_PREFIX`/`NODE_PATH` are always resolved to a usable
/// value, not left absent, mirroring the original tool chain's own
/// `os.environ[...] = ...` defaulting (it sets these unconditionally,
/// falling back to the build directory and a `node_modules` alongside it)
/// rather than only forwarding them when already present in the caller's
/// environment.
#[must_use]
pub fn context_from(args: &Args) -> core::BuildContext {
    let build_dir = env_path("BUILD_DIR").unwrap_or_else(|| env::current_dir().unwrap_or_default());
    let tool_dir = env_path("FROGFS_DIR").unwrap_or_else(|| env::current_dir().unwrap_or_default());

    let node_prefix = env_path("NODE_PREFIX").unwrap_or_else(|| build_dir.clone());
    let node_path = env_path("NODE_PATH").or_else(|| {
        env::join_paths([node_prefix.join("node_modules"), tool_dir.clone()])
            .ok()
            .map(PathBuf::from)
    });

    core::BuildContext {
        root: args.root.clone(),
        output: args.output.clone(),
        config: args.config.clone(),
        align: args.align,
        include_dirs: args.dirs,
        build_dir,
        tool_dir,
        node_prefix: Some(node_prefix),
        node_path,
    }
}

/// Runs `mkfrogfs` end to end: installs logging, resolves the build
/// context, and drives the pipeline. Returns the exit code `main` should
/// report.
pub fn run(args: &Args) -> ExitCode {
    logging::init(args.verbose);

    let ctx = context_from(args);
    match core::run(&ctx) {
        Ok(RunOutcome::Rewrote) => {
            info!(output = %ctx.output.display(), "build complete");
            ExitCode::Ok
        }
        Ok(RunOutcome::UpToDate) => ExitCode::Ok,
        Err(err) => {
            tracing::error!(error = %err, "build failed");
            exit_code_for(&err)
        }
    }
}

fn exit_code_for(err: &BuildError) -> ExitCode {
    err.exit_code()
}
