//! # pipescout CLI
//!
//! Binary entry point for the `pipescout` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! dispatching to the chosen subcommand, and translating top-level errors
//! into user-facing output. The scanning logic itself lives in the library
//! crate, keeping this binary a thin wrapper.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
