//! Category stability under noise with no true change (T1.1, T1.6).

use crate::{
    cohort::{Archetype, CohortGenerator, Perturbation},
    engine::{PatientHistory, RiskCategory, ScoringEngine},
    metrics::{round3, wilson_interval},
};

use super::TrialMetrics;

const SWEEP_CASES: usize = 1_000;
const SWEEP_JITTER: f64 = 1.0;

const FALSE_ALERT_DAYS: usize = 25_000;

/// T1.1: does a large one-day jitter leave the category unchanged?
pub fn perturbation_sweep(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut unchanged = 0usize;
    for _ in 0..SWEEP_CASES {
        let baseline = generator.baseline(Archetype::Mixed);
        let reference = generator.sample(&baseline, &Perturbation::jitter(0.0));
        let mut history = PatientHistory::new();
        let before = engine.score(&reference, &baseline, &mut history).category;
        let noisy = generator.sample(&baseline, &Perturbation::jitter(SWEEP_JITTER));
        let after = engine.score(&noisy, &baseline, &mut history).category;
        if before == after {
            unchanged += 1;
        }
    }

    let rate = unchanged as f64 / SWEEP_CASES as f64;
    let (low, high) = wilson_interval(rate, SWEEP_CASES);
    TrialMetrics::new()
        .with("N_cases", SWEEP_CASES)
        .with("unchanged_rate", round3(rate))
        .with("unchanged_rate_CI95_low", round3(low))
        .with("unchanged_rate_CI95_high", round3(high))
}

/// T1.6: any non-Green on a baseline-identical day is a false alert.
pub fn false_alert_sweep(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut false_alerts = 0usize;
    for _ in 0..FALSE_ALERT_DAYS {
        let baseline = generator.baseline(Archetype::Mixed);
        let observation = generator.sample(&baseline, &Perturbation::jitter(0.0));
        let mut history = PatientHistory::new();
        let predicted = engine.score(&observation, &baseline, &mut history).category;
        if predicted != RiskCategory::Green {
            false_alerts += 1;
        }
    }

    let rate = false_alerts as f64 / FALSE_ALERT_DAYS as f64;
    let (low, high) = wilson_interval(rate, FALSE_ALERT_DAYS);
    TrialMetrics::new()
        .with("N_days", FALSE_ALERT_DAYS)
        .with("false_alert_rate", round3(rate))
        .with("CI95_low", round3(low))
        .with("CI95_high", round3(high))
        .with("false_alerts", false_alerts)
}
