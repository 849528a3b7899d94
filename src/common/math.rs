//! Small numeric helpers shared by the indicators.

/// Relative tolerance used when comparing indicator values.
pub const REL_EPSILON: f64 = 1e-9;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Percentage distance of `price` from `reference`; 0.0 when the reference is unusable.
pub fn percentage_distance(price: f64, reference: f64) -> f64 {
    if reference == 0.0 || !reference.is_finite() || !price.is_finite() {
        return 0.0;
    }
    (price - reference) / reference * 100.0
}

/// True when `a` and `b` are equal within [`REL_EPSILON`], scaled by magnitude.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= REL_EPSILON * scale
}
