//! Ordinal surrogate AUC: the mean of three binary rank-sum AUCs at the
//! thresholds >= Yellow, >= Orange and >= Red.

use crate::engine::RiskCategory;

pub fn surrogate_auc(truth: &[RiskCategory], predicted: &[RiskCategory]) -> f64 {
    let scores: Vec<usize> = predicted.iter().map(|c| c.rank()).collect();
    let thresholds = [RiskCategory::Yellow, RiskCategory::Orange, RiskCategory::Red];
    let total: f64 = thresholds
        .iter()
        .map(|threshold| {
            let labels: Vec<bool> = truth.iter().map(|t| t >= threshold).collect();
            binary_auc(&labels, &scores)
        })
        .sum();
    total / thresholds.len() as f64
}

/// Mann-Whitney AUC. Ties are not averaged: positives are listed first and
/// the sort is stable, so tied positives take the lower ranks. Returns 0.5
/// when either class is empty.
pub fn binary_auc(labels: &[bool], scores: &[usize]) -> f64 {
    let positives: Vec<usize> = scores
        .iter()
        .zip(labels)
        .filter(|(_, positive)| **positive)
        .map(|(score, _)| *score)
        .collect();
    let negatives: Vec<usize> = scores
        .iter()
        .zip(labels)
        .filter(|(_, positive)| !**positive)
        .map(|(score, _)| *score)
        .collect();
    if positives.is_empty() || negatives.is_empty() {
        return 0.5;
    }

    let mut ranked: Vec<(usize, bool)> = positives
        .iter()
        .map(|s| (*s, true))
        .chain(negatives.iter().map(|s| (*s, false)))
        .collect();
    ranked.sort_by_key(|(score, _)| *score);

    let rank_sum: f64 = ranked
        .iter()
        .enumerate()
        .filter(|(_, (_, positive))| *positive)
        .map(|(idx, _)| (idx + 1) as f64)
        .sum();
    let n1 = positives.len() as f64;
    let n0 = negatives.len() as f64;
    (rank_sum - n1 * (n1 + 1.0) / 2.0) / (n1 * n0)
}
