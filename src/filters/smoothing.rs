use std::collections::VecDeque;
use std::f64::consts::PI;

/// Causal Hann-window smoothing for the vertical-acceleration channel.
/// Acts as the low-pass half of the roughness band-pass.
pub struct HannSmoother {
    window: VecDeque<f64>,
    /// `weights[k]` holds the normalized window for `k + 1` buffered samples
    weights: Vec<Vec<f64>>,
}

impl HannSmoother {
    /// Create a smoother over the last `window_size` samples (1 = passthrough)
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        HannSmoother {
            window: VecDeque::with_capacity(window_size),
            weights: (1..=window_size).map(hann_weights).collect(),
        }
    }

    /// Push a sample and return the smoothed value
    pub fn apply(&mut self, value: f64) -> f64 {
        if self.window.len() == self.weights.len() {
            self.window.pop_front();
        }
        self.window.push_back(value);

        let weights = &self.weights[self.window.len() - 1];
        self.window.iter().zip(weights).map(|(v, w)| v * w).sum()
    }

    pub fn window_size(&self) -> usize {
        self.weights.len()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// Normalized Hann weights `0.5 - 0.5·cos(2πi / (n-1))`. The endpoints are
/// zero, so n = 2 falls back to a plain average.
fn hann_weights(n: usize) -> Vec<f64> {
    match n {
        0 | 1 => vec![1.0],
        2 => vec![0.5, 0.5],
        _ => {
            let raw: Vec<f64> = (0..n)
                .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
                .collect();
            let sum: f64 = raw.iter().sum();
            raw.iter().map(|w| w / sum).collect()
        }
    }
}

/// Smooth a whole series with a fresh [`HannSmoother`].
pub fn smooth(values: &[f64], window_size: usize) -> Vec<f64> {
    if window_size <= 1 {
        return values.to_vec();
    }
    let mut smoother = HannSmoother::new(window_size);
    values.iter().map(|v| smoother.apply(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let mut smoother = HannSmoother::new(9);
        assert_eq!(smoother.apply(5.0), 5.0);
    }

    #[test]
    fn test_two_values() {
        let mut smoother = HannSmoother::new(9);
        smoother.apply(2.0);
        let result = smoother.apply(4.0);
        assert!((result - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_window_wrapping() {
        let mut smoother = HannSmoother::new(2);
        smoother.apply(1.0);
        smoother.apply(2.0);
        let result = smoother.apply(3.0);
        assert_eq!(smoother.len(), 2);
        assert_eq!(smoother.window_size(), 2);
        assert!((result - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_constant_series_unchanged() {
        let out = smooth(&[1.5; 20], 9);
        assert!(out.iter().all(|v| (v - 1.5).abs() < 1e-12));
    }

    #[test]
    fn test_attenuates_alternating_signal() {
        let input: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let out = smooth(&input, 9);
        // steady state of an odd-length Hann window on a Nyquist tone is small
        assert!(out[40].abs() < 0.2);
    }

    #[test]
    fn test_window_one_is_passthrough() {
        let input = [1.0, -2.0, 3.0];
        assert_eq!(smooth(&input, 1), input.to_vec());
    }
}
