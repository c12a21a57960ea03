//! Engine-versus-oracle agreement on mixed chronic and acute cohorts
//! (T1.5, T1.9).

use crate::{
    cohort::{Archetype, CohortGenerator, Perturbation},
    engine::{Baseline, Observation, PatientHistory, RiskCategory, ScoringEngine},
    metrics::{accuracy, round3, surrogate_auc, wilson_interval, ConfusionMatrix},
    oracle,
};

use super::TrialMetrics;

const CHRONIC_ACUTE_CASES: usize = 2_000;
const CHRONIC_SHARE: f64 = 0.6;

const HOLDOUT_COHORTS: [(Archetype, usize); 5] = [
    (Archetype::Low, 800),
    (Archetype::Mild, 1_200),
    (Archetype::Advanced, 1_000),
    (Archetype::Severe, 600),
    (Archetype::Mixed, 1_200),
];
const HOLDOUT_PLAIN_SHARE: f64 = 0.7;
const HOLDOUT_ORTHOPNEA_SHARE: f64 = 0.35;

#[derive(Debug, Default)]
struct Graded {
    truth: Vec<RiskCategory>,
    predicted: Vec<RiskCategory>,
}

impl Graded {
    fn with_capacity(n: usize) -> Self {
        Self {
            truth: Vec::with_capacity(n),
            predicted: Vec::with_capacity(n),
        }
    }

    /// Grade a single-day case on a fresh history.
    fn push(
        &mut self,
        engine: &ScoringEngine,
        observation: &Observation,
        baseline: &Baseline,
    ) {
        self.truth.push(oracle::grade(observation, baseline));
        let mut history = PatientHistory::new();
        self.predicted
            .push(engine.score(observation, baseline, &mut history).category);
    }

    fn len(&self) -> usize {
        self.truth.len()
    }

    fn accuracy_metrics(&self) -> TrialMetrics {
        let acc = accuracy(&self.truth, &self.predicted);
        let (low, high) = wilson_interval(acc, self.len());
        TrialMetrics::new()
            .with("N_cases", self.len())
            .with("accuracy", round3(acc))
            .with("accuracy_CI95_low", round3(low))
            .with("accuracy_CI95_high", round3(high))
            .with(
                "auc_surrogate",
                round3(surrogate_auc(&self.truth, &self.predicted)),
            )
    }
}

/// T1.5: stable advanced-baseline patients against mild patients with an
/// acute bump.
pub fn chronic_vs_acute(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let mut graded = Graded::with_capacity(CHRONIC_ACUTE_CASES);
    for _ in 0..CHRONIC_ACUTE_CASES {
        let (baseline, observation) = if generator.chance(CHRONIC_SHARE) {
            let baseline = generator.baseline(Archetype::Advanced);
            let observation = generator.sample(&baseline, &Perturbation::jitter(0.2));
            (baseline, observation)
        } else {
            let baseline = generator.baseline(Archetype::Mild);
            let sob = generator.choose(&[0.8, 1.2]).unwrap_or(0.8);
            let edema = generator.choose(&[0.6, 1.0]).unwrap_or(0.6);
            let perturbation = Perturbation::jitter(0.2).with_bumps([sob, edema, 0.3]);
            let observation = generator.sample(&baseline, &perturbation);
            (baseline, observation)
        };
        graded.push(engine, &observation, &baseline);
    }

    graded
        .accuracy_metrics()
        .with("true_dist", ConfusionMatrix::distribution(&graded.truth))
        .with("pred_dist", ConfusionMatrix::distribution(&graded.predicted))
}

/// T1.9: pooled holdout across all archetypes with a minority of acute
/// presentations.
pub fn integrated_holdout(generator: &mut CohortGenerator, engine: &ScoringEngine) -> TrialMetrics {
    let total: usize = HOLDOUT_COHORTS.iter().map(|(_, n)| n).sum();
    let mut graded = Graded::with_capacity(total);
    for (archetype, size) in HOLDOUT_COHORTS {
        for _ in 0..size {
            let baseline = generator.baseline(archetype);
            let perturbation = if generator.chance(HOLDOUT_PLAIN_SHARE) {
                Perturbation::jitter(0.2)
            } else {
                let bumps = [
                    generator.uniform(0.6, 1.2),
                    generator.uniform(0.3, 1.0),
                    generator.uniform(0.2, 0.6),
                ];
                let orthopnea = generator.chance(HOLDOUT_ORTHOPNEA_SHARE);
                Perturbation::jitter(0.2)
                    .with_bumps(bumps)
                    .with_orthopnea(orthopnea)
            };
            let observation = generator.sample(&baseline, &perturbation);
            graded.push(engine, &observation, &baseline);
        }
    }

    graded.accuracy_metrics().with(
        "confusion",
        ConfusionMatrix::from_pairs(&graded.truth, &graded.predicted),
    )
}
