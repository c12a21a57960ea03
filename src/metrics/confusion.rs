//! Confusion counts and accuracy over paired category sequences.

use indexmap::IndexMap;

use crate::engine::RiskCategory;

const N: usize = RiskCategory::ALL.len();

/// Truth × prediction count table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[u64; N]; N],
}

impl ConfusionMatrix {
    /// Tally zipped `(truth, predicted)` pairs; extra elements on either side
    /// are ignored.
    pub fn from_pairs(truth: &[RiskCategory], predicted: &[RiskCategory]) -> Self {
        let mut matrix = Self::default();
        for (t, p) in truth.iter().zip(predicted) {
            matrix.record(*t, *p);
        }
        matrix
    }

    /// Diagonal table describing the label distribution of one sequence.
    pub fn distribution(labels: &[RiskCategory]) -> Self {
        Self::from_pairs(labels, labels)
    }

    pub fn record(&mut self, truth: RiskCategory, predicted: RiskCategory) {
        self.counts[truth.rank()][predicted.rank()] += 1;
    }

    pub fn count(&self, truth: RiskCategory, predicted: RiskCategory) -> u64 {
        self.counts[truth.rank()][predicted.rank()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> u64 {
        (0..N).map(|idx| self.counts[idx][idx]).sum()
    }

    /// Flat table keyed `"Truth->Predicted"`, in category order.
    pub fn to_table(&self) -> IndexMap<String, u64> {
        let mut table = IndexMap::with_capacity(N * N);
        for truth in RiskCategory::ALL {
            for predicted in RiskCategory::ALL {
                table.insert(format!("{truth}->{predicted}"), self.count(truth, predicted));
            }
        }
        table
    }
}

/// Fraction of exact matches; an empty input scores 0.
pub fn accuracy(truth: &[RiskCategory], predicted: &[RiskCategory]) -> f64 {
    let hits = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    hits as f64 / truth.len().max(1) as f64
}
