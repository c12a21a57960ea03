//! Wilson score interval for a binomial proportion.

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// 95% Wilson interval for proportion `p` observed over `n` trials.
pub fn wilson_interval(p: f64, n: usize) -> (f64, f64) {
    wilson_interval_z(p, n, Z_95)
}

/// Wilson interval with an explicit quantile. `n == 0` yields `(0, 0)`.
pub fn wilson_interval_z(p: f64, n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let n = n as f64;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let centre = (p + z2 / (2.0 * n)) / denom;
    let half = (z / denom) * ((p * (1.0 - p) / n) + z2 / (4.0 * n * n)).sqrt();
    ((centre - half).max(0.0), (centre + half).min(1.0))
}
