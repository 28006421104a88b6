//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use pipescout::output::OutputConfig;

use crate::commands;

/// pipescout - Detect Apple-platform projects and propose CI/CD pipelines
#[derive(Parser, Debug)]
#[command(name = "pipescout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory and generate pipeline configs with selection options
    Scan(commands::scan::ScanArgs),

    /// Display the option tree of a scanned directory
    Tree(commands::tree::TreeArgs),

    /// Emit the default option tree and pipeline configs without scanning
    Defaults(commands::defaults::DefaultsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Scan(args) => commands::scan::execute(args, &output),
            Commands::Tree(args) => commands::tree::execute(args, &output),
            Commands::Defaults(args) => commands::defaults::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let filter = match level {
        "error" | "warn" | "info" | "debug" | "trace" => level,
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .try_init()
        .ok();
}
