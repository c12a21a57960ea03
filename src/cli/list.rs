//! CLI entry-point for listing available trials.

use anyhow::Result;

use crate::trials::TrialId;

pub fn run() -> Result<()> {
    for id in TrialId::ALL {
        println!("{}\t{}", id.code(), id.title());
    }
    Ok(())
}
