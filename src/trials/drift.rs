//! Score drift when nothing clinically changes (T1.0, T1.8).

use crate::{
    cohort::{Archetype, CohortGenerator, Perturbation},
    engine::{PatientHistory, ScoringEngine},
    metrics::{fraction_within, mean, population_std, round3},
};

use super::TrialMetrics;

const DRIFT_USERS: usize = 10_000;
const DRIFT_DAYS: usize = 30;
/// Days with the wider jitter before the baseline settles.
const SETTLING_DAYS: usize = 14;
const DRIFT_BAND: f64 = 0.04;

const STRESS_CASES: usize = 4_000;
const STRESS_BAND: f64 = 0.05;

/// T1.0: first-to-last normalized drift over a month of jitter-only days.
pub fn baseline_drift(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut drifts = Vec::with_capacity(DRIFT_USERS);
    for _ in 0..DRIFT_USERS {
        let baseline = generator.baseline(Archetype::Mixed);
        let mut history = PatientHistory::new();
        let mut first = 0.0;
        for day in 0..DRIFT_DAYS {
            let jitter = if day < SETTLING_DAYS { 0.2 } else { 0.1 };
            let observation = generator.sample(&baseline, &Perturbation::jitter(jitter));
            let scored = engine.score(&observation, &baseline, &mut history);
            if day == 0 {
                first = scored.normalized;
            }
        }
        let last = history.normalized_scores().last().copied().unwrap_or(first);
        drifts.push(last - first);
    }

    TrialMetrics::new()
        .with("N_users", DRIFT_USERS)
        .with("days", DRIFT_DAYS)
        .with("mean_drift", round3(mean(&drifts)))
        .with("std_drift", round3(population_std(&drifts)))
        .with(
            "stable_within_pm_0_04",
            round3(fraction_within(&drifts, DRIFT_BAND)),
        )
}

/// T1.8: one clean day then one jittered day across every archetype.
pub fn cross_baseline_stress(
    generator: &mut CohortGenerator,
    engine: &ScoringEngine,
) -> TrialMetrics {
    let mut drifts = Vec::with_capacity(STRESS_CASES);
    for _ in 0..STRESS_CASES {
        let archetype = generator
            .choose(&Archetype::ALL)
            .unwrap_or(Archetype::Mixed);
        let baseline = generator.baseline(archetype);
        let mut history = PatientHistory::new();
        let clean = generator.sample(&baseline, &Perturbation::jitter(0.0));
        let day0 = engine.score(&clean, &baseline, &mut history);
        let noisy = generator.sample(&baseline, &Perturbation::jitter(0.2));
        let day1 = engine.score(&noisy, &baseline, &mut history);
        drifts.push(day1.normalized - day0.normalized);
    }

    let abs_drifts: Vec<f64> = drifts.iter().map(|d| d.abs()).collect();
    TrialMetrics::new()
        .with("N_cases", STRESS_CASES)
        .with("mean_abs_drift", round3(mean(&abs_drifts)))
        .with(
            "within_pm_0_05",
            round3(fraction_within(&drifts, STRESS_BAND)),
        )
}
