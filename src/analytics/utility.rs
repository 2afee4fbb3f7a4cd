/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty
/// input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `numerator / denominator * 100`, or `None` when the denominator is zero.
/// A zero denominator is "undefined", never a computed zero.
pub fn ratio_pct(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator * 100.0)
}
