//! HeartLink v4.1 severity score and its synthetic validation harness.

pub mod cli;
pub mod cohort;
pub mod config;
pub mod engine;
pub mod logging;
pub mod metrics;
pub mod oracle;
pub mod report;
pub mod trials;
