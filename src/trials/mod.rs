//! Validation protocols T1.0–T1.9.
//!
//! Each protocol builds its own synthetic cohort from the shared generator,
//! drives the engine (and, where it grades accuracy, the oracle) and folds
//! the outputs into a flat [`TrialMetrics`] map.

pub mod discrimination;
pub mod drift;
pub mod escalation;
pub mod perturbation;
pub mod stability;

use std::{fmt, str::FromStr, time::Instant};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{cohort::CohortGenerator, engine::ScoringEngine, metrics::ConfusionMatrix};

/// Identifier of a validation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TrialId {
    #[serde(rename = "T1.0")]
    BaselineDrift,
    #[serde(rename = "T1.1")]
    PerturbationSweep,
    #[serde(rename = "T1.2")]
    OrthopneaTrigger,
    #[serde(rename = "T1.3")]
    MergedNoiseGuard,
    #[serde(rename = "T1.4")]
    CooldownClamp,
    #[serde(rename = "T1.5")]
    ChronicVsAcute,
    #[serde(rename = "T1.6")]
    FalseAlertSweep,
    #[serde(rename = "T1.7")]
    PingPongAudit,
    #[serde(rename = "T1.8")]
    CrossBaselineStress,
    #[serde(rename = "T1.9")]
    IntegratedHoldout,
}

impl TrialId {
    pub const ALL: [TrialId; 10] = [
        Self::BaselineDrift,
        Self::PerturbationSweep,
        Self::OrthopneaTrigger,
        Self::MergedNoiseGuard,
        Self::CooldownClamp,
        Self::ChronicVsAcute,
        Self::FalseAlertSweep,
        Self::PingPongAudit,
        Self::CrossBaselineStress,
        Self::IntegratedHoldout,
    ];

    /// Short code, e.g. `T1.3`.
    pub fn code(self) -> &'static str {
        match self {
            Self::BaselineDrift => "T1.0",
            Self::PerturbationSweep => "T1.1",
            Self::OrthopneaTrigger => "T1.2",
            Self::MergedNoiseGuard => "T1.3",
            Self::CooldownClamp => "T1.4",
            Self::ChronicVsAcute => "T1.5",
            Self::FalseAlertSweep => "T1.6",
            Self::PingPongAudit => "T1.7",
            Self::CrossBaselineStress => "T1.8",
            Self::IntegratedHoldout => "T1.9",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BaselineDrift => "Baseline Drift Audit",
            Self::PerturbationSweep => "Daily Perturbation Sweep",
            Self::OrthopneaTrigger => "Orthopnea Trigger Sensitivity",
            Self::MergedNoiseGuard => "Merged-Noise Guard Test",
            Self::CooldownClamp => "Cool-Down Clamp Validation",
            Self::ChronicVsAcute => "Chronic vs Acute Distinction",
            Self::FalseAlertSweep => "False-Alert Sweep",
            Self::PingPongAudit => "Ping-Pong Stability Audit",
            Self::CrossBaselineStress => "Cross-Baseline Stress",
            Self::IntegratedHoldout => "Integrated Validation Holdout (Final)",
        }
    }

    /// File-name friendly code, e.g. `T1_3`.
    pub fn file_stem(self) -> String {
        self.code().replace('.', "_")
    }
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trial `{0}` (expected T1.0 through T1.9)")]
pub struct UnknownTrial(pub String);

impl FromStr for TrialId {
    type Err = UnknownTrial;

    /// Accepts `T1.3`, `t1_3` or `1.3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace('_', ".");
        let code = if normalised.starts_with('T') {
            normalised
        } else {
            format!("T{normalised}")
        };
        Self::ALL
            .into_iter()
            .find(|id| id.code() == code)
            .ok_or_else(|| UnknownTrial(s.to_string()))
    }
}

/// A single reported metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Real(f64),
    /// Nested count table, e.g. a flattened confusion matrix.
    Table(IndexMap<String, u64>),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Count(n) => Some(*n as f64),
            Self::Real(x) => Some(*x),
            Self::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&IndexMap<String, u64>> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        Self::Count(value as u64)
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        Self::Count(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<ConfusionMatrix> for MetricValue {
    fn from(matrix: ConfusionMatrix) -> Self {
        Self::Table(matrix.to_table())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x:?}"),
            Self::Table(table) => {
                let encoded = serde_json::to_string(table).map_err(|_| fmt::Error)?;
                f.write_str(&encoded)
            }
        }
    }
}

/// Ordered metric name → value map produced once per trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrialMetrics(IndexMap<String, MetricValue>);

impl TrialMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<MetricValue>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Results of a suite run, in execution order.
pub type SuiteResults = IndexMap<TrialId, TrialMetrics>;

/// Run one protocol against the given generator.
pub fn run_trial(
    id: TrialId,
    generator: &mut CohortGenerator,
    engine: &ScoringEngine,
) -> TrialMetrics {
    match id {
        TrialId::BaselineDrift => drift::baseline_drift(generator, engine),
        TrialId::PerturbationSweep => perturbation::perturbation_sweep(generator, engine),
        TrialId::OrthopneaTrigger => escalation::orthopnea_trigger(generator, engine),
        TrialId::MergedNoiseGuard => escalation::merged_noise_guard(generator, engine),
        TrialId::CooldownClamp => escalation::cooldown_clamp(generator, engine),
        TrialId::ChronicVsAcute => discrimination::chronic_vs_acute(generator, engine),
        TrialId::FalseAlertSweep => perturbation::false_alert_sweep(generator, engine),
        TrialId::PingPongAudit => stability::ping_pong_audit(generator, engine),
        TrialId::CrossBaselineStress => drift::cross_baseline_stress(generator, engine),
        TrialId::IntegratedHoldout => discrimination::integrated_holdout(generator, engine),
    }
}

/// Run `ids` in order against a single generator seeded with `seed`.
/// The same seed and id list reproduce identical results.
pub fn run_suite(seed: u64, engine: &ScoringEngine, ids: &[TrialId]) -> SuiteResults {
    let mut generator = CohortGenerator::new(seed);
    let mut results = SuiteResults::new();
    for &id in ids {
        let started = Instant::now();
        let metrics = run_trial(id, &mut generator, engine);
        info!(
            trial = %id,
            title = id.title(),
            metrics = metrics.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trial complete"
        );
        results.insert(id, metrics);
    }
    results
}
