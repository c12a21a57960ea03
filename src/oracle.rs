//! Reference labels for grading engine output.
//!
//! Works on raw deltas with no tolerance, smoothing or hysteresis.

use crate::engine::{Baseline, Observation, RiskCategory};

/// Scale applied to the summed raw deltas.
pub const DELTA_SCALE: f64 = 0.8;
/// Added when orthopnea is new relative to baseline.
pub const ORTHOPNEA_BONUS: f64 = 1.0;

/// Latent severity, floored at 0.
pub fn latent(observation: &Observation, baseline: &Baseline) -> f64 {
    let today = observation.levels();
    let reference = baseline.levels();
    let mut severity = ((today[0] - reference[0])
        + (today[1] - reference[1])
        + (today[2] - reference[2]))
        * DELTA_SCALE;
    if observation.orthopnea && !baseline.orthopnea {
        severity += ORTHOPNEA_BONUS;
    }
    severity.max(0.0)
}

/// Band a latent severity with the engine's thresholds.
pub fn label(severity: f64) -> RiskCategory {
    RiskCategory::from_severity(severity)
}

pub fn grade(observation: &Observation, baseline: &Baseline) -> RiskCategory {
    label(latent(observation, baseline))
}
