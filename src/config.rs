use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IriError, Result};
use crate::types::AccelUnit;

/// Fine-grained resolution used for per-street views.
pub const DEFAULT_SEGMENT_LENGTH_M: f64 = 25.0;
/// Coarse resolution used for network-level summaries.
pub const NETWORK_SEGMENT_LENGTH_M: f64 = 150.0;
/// Typical urban driving speed (36 km/h), used when no GPS is available.
pub const DEFAULT_NOMINAL_SPEED_MPS: f64 = 10.0;
pub const DEFAULT_HIGHPASS_CUTOFF_HZ: f64 = 0.5;
/// m/km of IRI per m/s² of RMS vertical acceleration.
pub const DEFAULT_CALIBRATION: f64 = 2.0;
pub const DEFAULT_MIN_TRAILING_FRACTION: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAxis {
    /// Axis with the largest mean magnitude over the trip
    Dominant,
    X,
    Y,
    Z,
    /// Projection onto the trip's mean acceleration direction
    GravityProjection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Auto,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn seconds_per_unit(&self) -> f64 {
        match self {
            TimeUnit::Auto | TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e-3,
            TimeUnit::Microseconds => 1e-6,
            TimeUnit::Nanoseconds => 1e-9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeBase {
    /// Keep the cleaned, strictly increasing timestamps
    Validated,
    /// Resample to an evenly spaced grid with the same sample count
    Uniform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// GPS when at least two fixes exist, constant speed otherwise
    Auto,
    ConstantSpeed,
    Gps,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub time_unit: TimeUnit,
    pub accel_unit: AccelUnit,
    pub vertical_axis: VerticalAxis,
    pub time_base: TimeBase,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Auto,
            accel_unit: AccelUnit::Auto,
            vertical_axis: VerticalAxis::Dominant,
            time_base: TimeBase::Validated,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoughnessConfig {
    pub distance_mode: DistanceMode,
    pub nominal_speed_mps: f64,
    /// <= 0 disables the high-pass stage
    pub highpass_cutoff_hz: f64,
    /// Hann smoothing window in samples; 1 disables smoothing
    pub smoothing_window: usize,
    pub calibration: f64,
    /// Trailing segments shorter than this fraction of the segment length
    /// are merged into the previous segment
    pub min_trailing_fraction: f64,
}

impl Default for RoughnessConfig {
    fn default() -> Self {
        Self {
            distance_mode: DistanceMode::Auto,
            nominal_speed_mps: DEFAULT_NOMINAL_SPEED_MPS,
            highpass_cutoff_hz: DEFAULT_HIGHPASS_CUTOFF_HZ,
            smoothing_window: 1,
            calibration: DEFAULT_CALIBRATION,
            min_trailing_fraction: DEFAULT_MIN_TRAILING_FRACTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub segment_length_m: f64,
    pub preprocess: PreprocessConfig,
    pub roughness: RoughnessConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            segment_length_m: DEFAULT_SEGMENT_LENGTH_M,
            preprocess: PreprocessConfig::default(),
            roughness: RoughnessConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn with_segment_length(segment_length_m: f64) -> Self {
        Self {
            segment_length_m,
            ..Default::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| IriError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.roughness;
        if !(self.segment_length_m.is_finite() && self.segment_length_m > 0.0) {
            return Err(IriError::DegenerateSegmentation(format!(
                "segment length must be positive, got {}",
                self.segment_length_m
            )));
        }
        if !(r.nominal_speed_mps.is_finite() && r.nominal_speed_mps > 0.0) {
            return Err(IriError::Config(format!(
                "nominal speed must be positive, got {}",
                r.nominal_speed_mps
            )));
        }
        if !r.highpass_cutoff_hz.is_finite() {
            return Err(IriError::Config("high-pass cutoff must be finite".into()));
        }
        if r.smoothing_window == 0 {
            return Err(IriError::Config("smoothing window must be >= 1".into()));
        }
        if !(r.calibration.is_finite() && r.calibration > 0.0) {
            return Err(IriError::Config(format!(
                "calibration must be positive, got {}",
                r.calibration
            )));
        }
        if !(0.0..=1.0).contains(&r.min_trailing_fraction) {
            return Err(IriError::Config(format!(
                "min_trailing_fraction must be in [0, 1], got {}",
                r.min_trailing_fraction
            )));
        }
        Ok(())
    }

    /// Hash of every field, used to keep cached results from different
    /// configurations apart. Built on `DefaultHasher`, so it is only
    /// comparable within one process; do not persist it.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        // serde_json output is deterministic for structs (field order)
        serde_json::to_string(self)
            .unwrap_or_default()
            .hash(&mut hasher);
        hasher.finish()
    }
}
