//! HeartLink v4.1 daily severity score.
//!
//! A per-patient state machine: today's observation is compared against the
//! patient's baseline, smoothed against prior days, banded into a
//! [`RiskCategory`] and finally passed through de-escalation hysteresis.

pub mod category;
pub mod deescalation;
pub mod ema;
pub mod history;
pub mod levels;

use serde::Serialize;
use tracing::trace;

use crate::metrics::round3;

pub use category::RiskCategory;
pub use history::{HistoryEntry, PatientHistory};
pub use levels::{Baseline, Observation, SymptomLevel};

/// Locked v4.1 tunables.
#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    pub ema_window_days: usize,
    pub mild_weight_factor: f64,
    pub delta_tolerance_base: f64,
    pub delta_tolerance_early: f64,
    /// Days of history below which the early tolerance applies.
    pub early_period_days: usize,
    pub deescalation_days: usize,
    pub acute_ws_jump: f64,
    pub worsening_gain: f64,
    pub improving_gain: f64,
    /// Minimum weighted delta for sob/edema to count towards the acute override.
    pub core_step: f64,
    pub noise_guard_min_snapped: usize,
    pub noise_cap: f64,
    pub bias_offset: f64,
    /// Cold-start series length, also the acute-jump median span.
    pub min_series_days: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ema_window_days: 26,
            mild_weight_factor: 0.55,
            delta_tolerance_base: 0.19,
            delta_tolerance_early: 0.20,
            early_period_days: 14,
            deescalation_days: 5,
            acute_ws_jump: 0.80,
            worsening_gain: 2.0,
            improving_gain: 1.2,
            core_step: 0.3,
            noise_guard_min_snapped: 2,
            noise_cap: 1.95,
            bias_offset: 0.05,
            min_series_days: 3,
        }
    }
}

/// Output for one scored day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub category: RiskCategory,
    /// Severity in [0, 10], rounded to 3 decimals.
    pub normalized: f64,
}

/// A scored day together with the history entry it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayScore {
    pub result: ScoreResult,
    pub entry: HistoryEntry,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: EngineConfig,
}

impl ScoringEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one day and append it to `history`.
    pub fn score(
        &self,
        observation: &Observation,
        baseline: &Baseline,
        history: &mut PatientHistory,
    ) -> ScoreResult {
        let day = self.evaluate(observation, baseline, history);
        history.append(day.entry);
        day.result
    }

    /// Score one day without touching `history`. The caller decides whether
    /// to [`append`](PatientHistory::append) the returned entry.
    pub fn evaluate(
        &self,
        observation: &Observation,
        baseline: &Baseline,
        history: &PatientHistory,
    ) -> DayScore {
        let cfg = &self.config;
        let tolerance = if history.len() < cfg.early_period_days {
            cfg.delta_tolerance_early
        } else {
            cfg.delta_tolerance_base
        };

        let today = observation.levels();
        let reference = baseline.levels();
        let mut weighted = [0.0f64; 3];
        let mut snapped = 0usize;
        for (idx, slot) in weighted.iter_mut().enumerate() {
            let mut delta = today[idx] - reference[idx];
            if delta.abs() < tolerance {
                delta = 0.0;
                snapped += 1;
            }
            *slot = if delta > 0.0 {
                delta * cfg.worsening_gain
            } else {
                delta * cfg.improving_gain
            };
        }

        let noise_guard = snapped >= cfg.noise_guard_min_snapped;
        let new_orthopnea = observation.orthopnea && !baseline.orthopnea;
        let weighted_symptoms = (weighted[0] + weighted[1] + weighted[2]) * cfg.mild_weight_factor;

        // Short histories are padded with today's value so the EMA has a
        // stable seed.
        let mut series = history.ws_series().to_vec();
        if series.len() < cfg.min_series_days {
            series.resize(cfg.min_series_days, weighted_symptoms);
        }
        let mut trend = ema::ema(&series, cfg.ema_window_days);
        if !trend.is_finite() {
            trend = 0.0;
        }

        let mut normalized = round3(weighted_symptoms + trend - cfg.bias_offset).clamp(0.0, 10.0);
        if !normalized.is_finite() {
            normalized = 0.0;
        }
        if noise_guard {
            normalized = normalized.min(cfg.noise_cap);
        }

        let banded = RiskCategory::from_severity(normalized);
        let mut proposed = banded;

        let jump = weighted_symptoms - ema::trailing_median(&series, cfg.min_series_days);
        let core_count = weighted[..2]
            .iter()
            .filter(|delta| **delta >= cfg.core_step)
            .count();
        if jump >= cfg.acute_ws_jump && (new_orthopnea || core_count >= 2) {
            let floor = if core_count >= 2 {
                RiskCategory::Orange
            } else {
                RiskCategory::Yellow
            };
            proposed = proposed.at_least(floor);
            trace!(%banded, %proposed, jump, core_count, new_orthopnea, "acute override");
        }

        let category =
            deescalation::hold_deescalation(history.categories(), proposed, cfg.deescalation_days);
        if category != proposed {
            trace!(%proposed, %category, "de-escalation hold");
        }

        DayScore {
            result: ScoreResult {
                category,
                normalized,
            },
            entry: HistoryEntry {
                weighted_symptoms,
                category,
                normalized,
            },
        }
    }
}
