//! Exponential moving average and the short-window median used for
//! acute-jump detection.

/// EMA with smoothing constant `k = 2 / (window + 1)`, seeded with the first
/// element. An empty series yields 0.
pub fn ema(series: &[f64], window: usize) -> f64 {
    let Some((first, rest)) = series.split_first() else {
        return 0.0;
    };
    let k = 2.0 / (window as f64 + 1.0);
    rest.iter().fold(*first, |acc, value| value * k + acc * (1.0 - k))
}

/// Upper median (`sorted[len / 2]`) of the trailing `span` values; 0 when empty.
pub fn trailing_median(series: &[f64], span: usize) -> f64 {
    let start = series.len().saturating_sub(span);
    let mut recent = series[start..].to_vec();
    if recent.is_empty() {
        return 0.0;
    }
    recent.sort_by(|a, b| a.total_cmp(b));
    recent[recent.len() / 2]
}
