use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "typolens")]
#[command(about = "Report typos introduced since a file's last saved version")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $TYPOLENS_CONFIG or ~/.typolens/config.toml)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the lines FILE adds over its baseline for typos
    Check {
        file: PathBuf,
        /// Previously saved version of FILE (whole file is checked if omitted)
        #[arg(long, short = 'b', value_name = "PATH")]
        baseline: Option<PathBuf>,
        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the text blocks AFTER adds over BEFORE
    Diff { before: PathBuf, after: PathBuf },
}
