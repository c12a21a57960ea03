//! Hysteresis against dropping straight from an unsafe band to Green.

use super::category::RiskCategory;

/// Accept a Green proposal only if the most recent Orange/Red day is followed
/// by at least `stable_days` non-escalated days; otherwise hold at Yellow.
/// Non-Green proposals, and histories with no escalation, pass through.
pub fn hold_deescalation(
    categories: &[RiskCategory],
    proposed: RiskCategory,
    stable_days: usize,
) -> RiskCategory {
    if proposed != RiskCategory::Green || categories.is_empty() {
        return proposed;
    }
    let Some(last_escalation) = categories.iter().rposition(|c| c.is_escalated()) else {
        return proposed;
    };
    let start = (last_escalation + 1).max(categories.len().saturating_sub(stable_days));
    let window = &categories[start..];
    if window.len() >= stable_days && window.iter().all(|c| !c.is_escalated()) {
        proposed
    } else {
        RiskCategory::Yellow
    }
}
