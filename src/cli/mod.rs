//! Command-line interface wiring for heartlink-trials.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod list;
pub mod run;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "HeartLink v4.1 synthetic validation suite", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Run(args) => run::run(args, settings),
            Commands::List => list::run(),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run validation trials and export their metrics.
    Run(run::Args),
    /// List the available trials.
    List,
}
