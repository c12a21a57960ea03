//! Runtime configuration utilities for heartlink-trials.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_RESULTS_NAME: &str = "HeartLink_v4_1_FullTrialResults";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Seed for the shared synthetic cohort generator.
    pub seed: u64,
    /// Root folder for exported artefacts.
    pub outputs_dir: PathBuf,
    /// Name of the results folder and archive stem under `outputs_dir`.
    pub results_name: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let seed = env::var("HEARTLINK_SEED")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let results_name = env::var("HEARTLINK_RESULTS_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESULTS_NAME.to_string());

        let settings = Self {
            seed,
            outputs_dir,
            results_name,
        };
        settings.ensure_outputs_dir()?;
        Ok(settings)
    }

    /// Replace the outputs root and make sure it exists.
    pub fn with_outputs_dir(mut self, outputs_dir: PathBuf) -> anyhow::Result<Self> {
        self.outputs_dir = outputs_dir;
        self.ensure_outputs_dir()?;
        Ok(self)
    }

    fn ensure_outputs_dir(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.outputs_dir).context("creating outputs dir")
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }

    /// Folder receiving the per-trial and combined result files.
    pub fn results_dir(&self) -> PathBuf {
        self.join_output(&self.results_name)
    }
}
