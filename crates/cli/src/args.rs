//! The `mkfrogfs` argument surface (spec §6.3):
//!
//! ```text
//! mkfrogfs [--config <path>] [--align <int>] [--dirs] [-v]... <root> <output>
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Builds a FrogFS image from a source directory.
#[derive(Debug, Parser)]
#[command(name = "mkfrogfs", version, about, long_about = None)]
pub struct Args {
    /// Filter rule config file.
    #[arg(long, value_name = "PATH", default_value = "default_config.yaml")]
    pub config: PathBuf,

    /// Entry alignment in bytes, must be a power of two.
    #[arg(long, value_name = "INT", default_value_t = 4)]
    pub align: u8,

    /// Emit directory entries into the image.
    #[arg(long)]
    pub dirs: bool,

    /// Increase log verbosity; repeatable (`-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// The source tree to pack.
    pub root: PathBuf,

    /// The image file to write.
    pub output: PathBuf,
}
