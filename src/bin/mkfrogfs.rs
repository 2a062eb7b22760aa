//! Build-time image packager for the FrogFS read-only embedded filesystem.

use clap::Parser;
use cli::Args;

fn main() -> std::process::ExitCode {
    let args = Args::parse();
    let exit_code = cli::run(&args);
    std::process::ExitCode::from(exit_code.as_i32() as u8)
}
