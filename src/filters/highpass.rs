//! First-order RC high-pass filter for irregularly sampled signals.
//!
//! The coefficient is recomputed per step from the actual Δt, so logger
//! jitter does not shift the cutoff: `α = RC / (RC + Δt)`,
//! `y[i] = α · (y[i-1] + x[i] - x[i-1])`.

#[derive(Debug, Clone)]
pub struct HighPassFilter {
    /// Time constant RC = 1 / (2π f_c), seconds
    rc: f64,
    prev_input: Option<f64>,
    prev_output: f64,
}

impl HighPassFilter {
    /// `cutoff_hz <= 0` builds a passthrough filter.
    pub fn new(cutoff_hz: f64) -> Self {
        let rc = if cutoff_hz > 0.0 {
            1.0 / (2.0 * std::f64::consts::PI * cutoff_hz)
        } else {
            f64::INFINITY
        };
        Self {
            rc,
            prev_input: None,
            prev_output: 0.0,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        self.rc.is_infinite()
    }

    /// Filter one sample taken `dt` seconds after the previous one.
    pub fn apply(&mut self, input: f64, dt: f64) -> f64 {
        if self.is_passthrough() {
            return input;
        }
        let output = match self.prev_input {
            // seed with the first sample so a centered signal starts without a step
            None => input,
            Some(prev) => {
                let alpha = self.rc / (self.rc + dt.max(0.0));
                alpha * (self.prev_output + input - prev)
            }
        };
        self.prev_input = Some(input);
        self.prev_output = output;
        output
    }

    pub fn reset(&mut self) {
        self.prev_input = None;
        self.prev_output = 0.0;
    }
}

/// Filter a series sampled at `times` (seconds, non-decreasing).
pub fn highpass(values: &[f64], times: &[f64], cutoff_hz: f64) -> Vec<f64> {
    let mut filter = HighPassFilter::new(cutoff_hz);
    let mut prev_t = times.first().copied().unwrap_or(0.0);
    values
        .iter()
        .zip(times)
        .map(|(v, t)| {
            let dt = t - prev_t;
            prev_t = *t;
            filter.apply(*v, dt)
        })
        .collect()
}
