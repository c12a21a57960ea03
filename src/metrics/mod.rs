//! Validation statistics computed over engine and oracle outputs.

pub mod auc;
pub mod confusion;
pub mod stability;
pub mod wilson;

pub use auc::surrogate_auc;
pub use confusion::{accuracy, ConfusionMatrix};
pub use stability::ping_pong_rate;
pub use wilson::{wilson_interval, wilson_interval_z};

/// Round to 3 decimals, the precision every reported rate uses.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation (divides by `n`).
pub fn population_std(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let centre = mean(samples);
    let var = samples
        .iter()
        .map(|value| {
            let centred = value - centre;
            centred * centred
        })
        .sum::<f64>()
        / samples.len() as f64;
    var.sqrt()
}

/// Median, averaging the two middle values for even lengths.
pub fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Share of samples with `|x| <= bound`.
pub fn fraction_within(samples: &[f64], bound: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().filter(|value| value.abs() <= bound).count() as f64 / samples.len() as f64
}
