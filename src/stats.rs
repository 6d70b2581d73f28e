/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n); 0.0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Root-mean-square; `None` for an empty slice.
pub fn rms(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    Some((sum_sq / values.len() as f64).sqrt())
}

/// Median of finite values; `None` when there are none.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(mean(&v), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(std_dev(&v), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_std_single_value() {
        assert_eq!(std_dev(&[3.3]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_rms() {
        assert_abs_diff_eq!(rms(&[3.0, -3.0]).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rms(&[1.0, 7.0]).unwrap(), 5.0, epsilon = 1e-12);
        assert!(rms(&[]).is_none());
    }

    #[test]
    fn test_median_ignores_non_finite() {
        assert_eq!(median(&[5.0, f64::NAN, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[f64::INFINITY]), None);
    }
}
