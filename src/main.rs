//! Entry point wiring CLI dispatch to the validation suite.

use anyhow::Result;
use heartlink_trials::{cli::Cli, config::Settings, logging};
use tracing::{info, instrument};

#[instrument]
fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings)
}
