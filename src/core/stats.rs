//! Numeric kernels shared by the analysis catalog.
//!
//! Every helper is total over its input: empty slices and degenerate
//! denominators yield 0.0 or `None` rather than panicking, so analysis
//! functions stay infallible.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0.0 for fewer than two
/// observations.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Coefficient of variation as a percentage: stddev / mean * 100.
/// `None` when the mean is exactly zero.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let avg = mean(values);
    if avg == 0.0 {
        return None;
    }
    Some(sample_stddev(values) / avg * 100.0)
}

/// Percentage change from `previous` to `current`; `None` when the prior
/// value is zero (division-by-zero signals null, never an error).
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Pearson correlation of two equal-length series; `None` with fewer than
/// two pairs or when either series has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs);
    let my = mean(ys);
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn sample_stddev_matches_hand_computation() {
        // values 2, 4, 4, 4, 5, 5, 7, 9: sample variance 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((sample_stddev(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn cv_is_none_when_mean_is_zero() {
        assert_eq!(coefficient_of_variation(&[-1.0, 1.0]), None);
        assert_eq!(coefficient_of_variation(&[]), None);
    }

    #[test]
    fn cv_is_non_negative_for_positive_mean() {
        let cv = coefficient_of_variation(&[10.0, 12.0, 8.0]).unwrap();
        assert!(cv >= 0.0);
    }

    #[test]
    fn percent_change_guards_division_by_zero() {
        assert_eq!(percent_change(150.0, 0.0), None);
        assert_eq!(percent_change(150.0, 100.0), Some(50.0));
        assert_eq!(percent_change(120.0, 150.0), Some(-20.0));
    }

    #[test]
    fn pearson_of_perfectly_linear_series_is_one() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let r = pearson_correlation(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let inverted = [8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&xs, &inverted).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_none_for_constant_series() {
        assert_eq!(pearson_correlation(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]), None);
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), None);
    }
}
