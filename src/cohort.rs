//! Synthetic patients: archetype baselines and perturbed daily observations.
//!
//! All randomness comes from one explicitly threaded [`CohortGenerator`]; the
//! order of draws is part of the reproducibility contract, so callers must not
//! reorder generator calls within a protocol.

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;

use crate::engine::{Baseline, Observation};

/// Baseline symptom profile families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Low,
    Mild,
    Advanced,
    Severe,
    /// Means drawn uniformly per patient.
    Mixed,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Self::Low,
        Self::Mild,
        Self::Advanced,
        Self::Severe,
        Self::Mixed,
    ];

    /// Fixed (sob, edema, fatigue) means; `None` for [`Archetype::Mixed`].
    pub fn fixed_levels(self) -> Option<[f64; 3]> {
        match self {
            Self::Low => Some([0.0, 0.0, 0.0]),
            Self::Mild => Some([0.5, 0.3, 0.7]),
            Self::Advanced => Some([1.5, 1.2, 1.8]),
            Self::Severe => Some([2.2, 2.0, 2.3]),
            Self::Mixed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mild => "mild",
            Self::Advanced => "advanced",
            Self::Severe => "severe",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `Mixed`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "mild" => Self::Mild,
            "advanced" => Self::Advanced,
            "severe" => Self::Severe,
            _ => Self::Mixed,
        })
    }
}

/// Upper bounds of the uniform draws for a mixed baseline.
const MIXED_UPPER: [f64; 3] = [2.5, 2.2, 2.5];

/// How one day's observation departs from the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Perturbation {
    /// Half-width of the per-symptom uniform noise.
    pub jitter: f64,
    /// Additive (sob, edema, fatigue) offsets.
    pub bumps: [f64; 3],
    pub orthopnea: bool,
}

impl Perturbation {
    pub fn jitter(jitter: f64) -> Self {
        Self {
            jitter,
            ..Self::default()
        }
    }

    pub fn with_bumps(mut self, bumps: [f64; 3]) -> Self {
        self.bumps = bumps;
        self
    }

    pub fn with_orthopnea(mut self, orthopnea: bool) -> Self {
        self.orthopnea = orthopnea;
        self
    }
}

/// Seeded source of synthetic baselines and observations.
#[derive(Debug, Clone)]
pub struct CohortGenerator {
    rng: StdRng,
    seed: u64,
}

impl CohortGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `lo + (hi - lo) * u`. Always consumes exactly one draw, including
    /// when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u: f64 = self.rng.gen();
        lo + (hi - lo) * u
    }

    /// Bernoulli trial with success probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Uniform pick from a non-empty slice.
    pub fn choose<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        options.choose(&mut self.rng).copied()
    }

    pub fn baseline(&mut self, archetype: Archetype) -> Baseline {
        let [sob, edema, fatigue] = match archetype.fixed_levels() {
            Some(levels) => levels,
            None => MIXED_UPPER.map(|upper| self.uniform(0.0, upper)),
        };
        Baseline::new(sob, edema, fatigue, false)
    }

    /// Baseline plus independent jitter and bumps per symptom, clamped to
    /// [0, 3]. Draws sob, edema, fatigue noise in that order.
    pub fn sample(&mut self, baseline: &Baseline, perturbation: &Perturbation) -> Observation {
        let reference = baseline.levels();
        let jitter = perturbation.jitter;
        let mut levels = [0.0f64; 3];
        for (idx, slot) in levels.iter_mut().enumerate() {
            *slot = reference[idx] + self.uniform(-jitter, jitter) + perturbation.bumps[idx];
        }
        let [sob, edema, fatigue] = levels;
        Observation::new(sob, edema, fatigue, perturbation.orthopnea)
    }
}
