//! Category oscillation over a trajectory.

use crate::engine::RiskCategory;

/// Share of positions `i >= 2` where the category returns to its value two
/// days earlier after a one-day change (A, B, A). Fewer than three entries
/// score 0.
pub fn ping_pong_rate(categories: &[RiskCategory]) -> f64 {
    if categories.len() < 3 {
        return 0.0;
    }
    let flips = categories
        .windows(3)
        .filter(|w| w[0] == w[2] && w[1] != w[2])
        .count();
    flips as f64 / (categories.len() - 2) as f64
}
