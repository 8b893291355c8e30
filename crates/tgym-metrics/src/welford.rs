/// One step of Welford's online algorithm.
///
/// `mean` and `m2` describe the `n` samples seen so far; `m2` is the running
/// sum of squared deviations (divide by `n` for the population variance).
/// Returns the pair after folding in `x`.
pub fn welford_update(mean: f64, m2: f64, n: u64, x: f64) -> (f64, f64) {
    let next_mean = mean + (x - mean) / (n as f64 + 1.0);
    let next_m2 = m2 + (x - mean) * (x - next_mean);
    (next_mean, next_m2)
}
