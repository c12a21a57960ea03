//! CLI entry-point for running trials and exporting results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    engine::ScoringEngine,
    report,
    trials::{self, TrialId},
};

/// Args for the `run` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Comma separated trial ids (e.g. T1.0,T1.3). Runs every trial when omitted.
    #[arg(long = "trial", value_delimiter = ',')]
    pub trials: Vec<TrialId>,
    /// Override the generator seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Override the outputs root directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Skip the ZIP bundle.
    #[arg(long)]
    pub no_archive: bool,
    /// Also print the combined metrics JSON to stdout.
    #[arg(long)]
    pub print_json: bool,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let settings = match args.out_dir.clone() {
        Some(dir) => settings.with_outputs_dir(dir)?,
        None => settings,
    };
    let seed = args.seed.unwrap_or(settings.seed);
    let ids = if args.trials.is_empty() {
        TrialId::ALL.to_vec()
    } else {
        args.trials.clone()
    };

    info!(seed, trials = ids.len(), "running validation suite");
    let engine = ScoringEngine::default();
    let results = trials::run_suite(seed, &engine, &ids);

    let summary = report::export(&results, &settings.results_dir(), seed, !args.no_archive)?;
    info!(
        dir = %summary.results_dir.display(),
        files = summary.files.len(),
        archive = ?summary.archive,
        "exported results"
    );

    if args.print_json {
        let json = serde_json::to_string_pretty(&results).context("serialise results")?;
        println!("{json}");
    }
    Ok(())
}
