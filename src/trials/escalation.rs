//! Escalation triggers and their guards (T1.2, T1.3, T1.4).

use crate::{
    cohort::{Archetype, CohortGenerator, Perturbation},
    engine::{Baseline, Observation, PatientHistory, RiskCategory, ScoringEngine},
    metrics::{median, round3, wilson_interval},
    oracle,
};

use super::TrialMetrics;

const ORTHOPNEA_CASES: usize = 500;

const NOISE_CASES: usize = 5_000;
const GUARDED_BUMP: f64 = 0.15;
const CONTROL_BUMP: f64 = 0.21;

const CLAMP_SEQUENCES: usize = 500;
const CLAMP_DAYS: usize = 20;

/// T1.2: new orthopnea plus a moderate sob bump must lift a mild patient to
/// at least Yellow.
pub fn orthopnea_trigger(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut escalated = 0usize;
    for _ in 0..ORTHOPNEA_CASES {
        let mut baseline = generator.baseline(Archetype::Mild);
        baseline.orthopnea = false;
        let perturbation = Perturbation::jitter(0.1)
            .with_bumps([0.8, 0.0, 0.0])
            .with_orthopnea(true);
        let observation = generator.sample(&baseline, &perturbation);
        let mut history = PatientHistory::new();
        let predicted = engine.score(&observation, &baseline, &mut history).category;
        if predicted >= RiskCategory::Yellow {
            escalated += 1;
        }
    }

    let rate = escalated as f64 / ORTHOPNEA_CASES as f64;
    let (low, high) = wilson_interval(rate, ORTHOPNEA_CASES);
    TrialMetrics::new()
        .with("N_cases", ORTHOPNEA_CASES)
        .with("orthopnea_escalation_accuracy", round3(rate))
        .with("CI95_low", round3(low))
        .with("CI95_high", round3(high))
}

/// T1.3: false positives for sub-tolerance bumps versus a control just above
/// tolerance. Both probes are graded by the oracle on a fresh history.
pub fn merged_noise_guard(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut fp_guard = 0usize;
    let mut fp_no_guard = 0usize;
    for _ in 0..NOISE_CASES {
        let baseline = generator.baseline(Archetype::Low);

        let guarded = Perturbation::jitter(0.0).with_bumps([GUARDED_BUMP, GUARDED_BUMP, 0.0]);
        let probe = generator.sample(&baseline, &guarded);
        if is_false_positive(engine, &probe, &baseline) {
            fp_guard += 1;
        }

        let control = Perturbation::jitter(0.0).with_bumps([CONTROL_BUMP, CONTROL_BUMP, 0.0]);
        let probe = generator.sample(&baseline, &control);
        if is_false_positive(engine, &probe, &baseline) {
            fp_no_guard += 1;
        }
    }

    let reduction = (fp_no_guard as f64 - fp_guard as f64) / fp_no_guard.max(1) as f64;
    TrialMetrics::new()
        .with("N_cases", NOISE_CASES)
        .with("fp_no_guard", fp_no_guard)
        .with("fp_guard", fp_guard)
        .with("false_alert_reduction", round3(reduction))
}

fn is_false_positive(
    engine: &ScoringEngine,
    observation: &Observation,
    baseline: &Baseline,
) -> bool {
    let mut history = PatientHistory::new();
    let predicted = engine.score(observation, baseline, &mut history).category;
    oracle::grade(observation, baseline) == RiskCategory::Green && predicted != RiskCategory::Green
}

/// T1.4: after an acute spike, Green must not return before the
/// de-escalation hold has elapsed.
pub fn cooldown_clamp(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let hold = engine.config().deescalation_days;
    let mut held = 0usize;
    let mut hold_days = Vec::with_capacity(CLAMP_SEQUENCES);
    for _ in 0..CLAMP_SEQUENCES {
        let baseline = generator.baseline(Archetype::Mild);
        let mut history = PatientHistory::new();
        let spike = Perturbation::jitter(0.0).with_bumps([1.2, 1.0, 0.6]);
        let observation = generator.sample(&baseline, &spike);
        engine.score(&observation, &baseline, &mut history);

        let mut first_green = None;
        for day in 1..CLAMP_DAYS {
            let observation = generator.sample(&baseline, &Perturbation::jitter(0.05));
            let scored = engine.score(&observation, &baseline, &mut history);
            if scored.category == RiskCategory::Green && first_green.is_none() {
                first_green = Some(day);
            }
        }

        if first_green.map_or(true, |day| day >= hold) {
            held += 1;
        }
        hold_days.push(first_green.unwrap_or(hold) as f64);
    }

    let rate = held as f64 / CLAMP_SEQUENCES as f64;
    let (low, high) = wilson_interval(rate, CLAMP_SEQUENCES);
    TrialMetrics::new()
        .with("N_sequences", CLAMP_SEQUENCES)
        .with("clamp_hold_rate", round3(rate))
        .with("CI95_low", round3(low))
        .with("CI95_high", round3(high))
        .with("median_days_to_green", median(&hold_days))
}
