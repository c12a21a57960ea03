//! Per-patient scoring history.

use serde::Serialize;

use super::category::RiskCategory;

/// Everything one scored day contributes to the history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub weighted_symptoms: f64,
    pub category: RiskCategory,
    pub normalized: f64,
}

/// Append-only record of a single simulated patient's scored days.
///
/// The three series always have equal length; [`append`](Self::append) is the
/// only mutator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientHistory {
    ws_series: Vec<f64>,
    categories: Vec<RiskCategory>,
    normalized_scores: Vec<f64>,
}

impl PatientHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Days recorded so far.
    pub fn len(&self) -> usize {
        self.normalized_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_scores.is_empty()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.ws_series.push(entry.weighted_symptoms);
        self.categories.push(entry.category);
        self.normalized_scores.push(entry.normalized);
    }

    pub fn ws_series(&self) -> &[f64] {
        &self.ws_series
    }

    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }

    pub fn normalized_scores(&self) -> &[f64] {
        &self.normalized_scores
    }

    pub fn last(&self) -> Option<HistoryEntry> {
        let idx = self.len().checked_sub(1)?;
        Some(HistoryEntry {
            weighted_symptoms: self.ws_series[idx],
            category: self.categories[idx],
            normalized: self.normalized_scores[idx],
        })
    }
}

impl FromIterator<HistoryEntry> for PatientHistory {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        let mut history = Self::new();
        for entry in iter {
            history.append(entry);
        }
        history
    }
}
