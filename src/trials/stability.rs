//! Category oscillation on a weekly symptom cycle (T1.7).

use crate::{
    cohort::{Archetype, CohortGenerator, Perturbation},
    engine::{PatientHistory, ScoringEngine},
    metrics::{mean, ping_pong_rate, population_std, round3},
};

use super::TrialMetrics;

const TRAJECTORIES: usize = 100;
const DAYS: usize = 60;
const CYCLE_DAYS: usize = 7;
/// Leading days of each cycle carrying the worsening step.
const WORSE_DAYS: usize = 3;

pub fn ping_pong_audit(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut rates = Vec::with_capacity(TRAJECTORIES);
    for _ in 0..TRAJECTORIES {
        let baseline = generator.baseline(Archetype::Mixed);
        let mut history = PatientHistory::new();
        for day in 0..DAYS {
            let step: f64 = if day % CYCLE_DAYS < WORSE_DAYS { 0.3 } else { -0.1 };
            let perturbation =
                Perturbation::jitter(0.15).with_bumps([step.max(0.0), (step / 2.0).max(0.0), 0.0]);
            let observation = generator.sample(&baseline, &perturbation);
            engine.score(&observation, &baseline, &mut history);
        }
        rates.push(ping_pong_rate(history.categories()));
    }

    TrialMetrics::new()
        .with("N_trajectories", TRAJECTORIES)
        .with("days", DAYS)
        .with("mean_ping_pong_rate", round3(mean(&rates)))
        .with("std", round3(population_std(&rates)))
}
