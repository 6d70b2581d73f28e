//! Roughness calculator.
//!
//! Signal chain per trip: remove the trip mean from the vertical channel,
//! first-order high-pass (default 0.5 Hz), optional Hann smoothing. Per
//! segment: IRI [m/km] = calibration × RMS [m/s²] of the filtered samples
//! inside the segment.
//!
//! Segmentation: `ceil(total / L)` contiguous segments of length `L`, the
//! last one possibly shorter. A trailing segment shorter than
//! `min_trailing_fraction · L` is merged into its predecessor.

use crate::config::RoughnessConfig;
use crate::distance::{distance_profile, DistanceProfile};
use crate::error::{IriError, Result};
use crate::filters::{highpass, smooth};
use crate::stats::{mean, rms};
use crate::types::{DistanceSource, ProcessedSample, Segment, SegmentRoughness};

/// Slack when dividing the trip into segments, so 100.0000000001 m at
/// L = 25 m still gives four segments.
const SEGMENT_COUNT_EPSILON: f64 = 1e-9;
/// Upper bound on segments per trip; 1 m segments over 1000 km.
pub const MAX_SEGMENTS: usize = 1_000_000;

#[derive(Clone, Debug)]
pub struct RoughnessOutput {
    pub segments: Vec<SegmentRoughness>,
    pub sampling_rate: f64,
    pub estimated_speed: f64,
    pub total_distance: f64,
    pub distance_source: DistanceSource,
}

impl RoughnessOutput {
    pub fn iri_values(&self) -> Vec<f64> {
        self.segments.iter().filter_map(|s| s.iri).collect()
    }
}

/// (count − 1) / duration
pub fn sampling_rate(count: usize, duration: f64) -> Result<f64> {
    if count < 2 || !(duration > 0.0) || !duration.is_finite() {
        return Err(IriError::InsufficientData(format!(
            "cannot derive sampling rate from {count} samples over {duration} s"
        )));
    }
    Ok((count - 1) as f64 / duration)
}

/// Partition the distance axis into contiguous segments and resolve each
/// segment's sample range. `distances` must be non-decreasing.
pub fn segment_bounds(
    distances: &[f64],
    segment_length: f64,
    min_trailing_fraction: f64,
) -> Result<Vec<Segment>> {
    if !(segment_length.is_finite() && segment_length > 0.0) {
        return Err(IriError::DegenerateSegmentation(format!(
            "segment length must be positive, got {segment_length}"
        )));
    }
    let total = distances.last().copied().unwrap_or(0.0);
    if !(total > 0.0) {
        return Err(IriError::DegenerateSegmentation(
            "trip covers no distance".into(),
        ));
    }

    let raw_count = (total / segment_length - SEGMENT_COUNT_EPSILON).ceil();
    if !(raw_count <= MAX_SEGMENTS as f64) {
        return Err(IriError::DegenerateSegmentation(format!(
            "{total:.1} m at {segment_length} m per segment exceeds {MAX_SEGMENTS} segments"
        )));
    }
    let mut count = (raw_count as usize).max(1);
    let trailing = total - (count - 1) as f64 * segment_length;
    if count > 1 && trailing < min_trailing_fraction * segment_length {
        log::debug!(
            "merging {:.2} m trailing segment into segment {}",
            trailing,
            count - 2
        );
        count -= 1;
    }

    let n = distances.len();
    let segments = (0..count)
        .map(|k| {
            let start_distance = k as f64 * segment_length;
            let is_last = k + 1 == count;
            let end_distance = if is_last {
                total
            } else {
                (k + 1) as f64 * segment_length
            };
            let start_index = distances.partition_point(|d| *d < start_distance);
            let end_index = if is_last {
                n
            } else {
                distances.partition_point(|d| *d < end_distance)
            };
            Segment {
                index: k,
                start_distance,
                length: end_distance - start_distance,
                start_index,
                end_index,
                center_index: start_index + end_index.saturating_sub(start_index) / 2,
                coordinate: None,
            }
        })
        .collect();
    Ok(segments)
}

/// Mean-removed, high-passed and optionally smoothed vertical channel.
pub fn filtered_signal(samples: &[ProcessedSample], config: &RoughnessConfig) -> Vec<f64> {
    let vertical: Vec<f64> = samples.iter().map(|s| s.vertical).collect();
    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    let offset = mean(&vertical);
    let centered: Vec<f64> = vertical.iter().map(|v| v - offset).collect();
    let filtered = highpass(&centered, &times, config.highpass_cutoff_hz);
    smooth(&filtered, config.smoothing_window)
}

/// Score each segment. Segments without samples get `iri = None`.
pub fn score_segments(
    segments: Vec<Segment>,
    signal: &[f64],
    calibration: f64,
) -> Vec<SegmentRoughness> {
    segments
        .into_iter()
        .map(|segment| {
            let end = segment.end_index.min(signal.len());
            let start = segment.start_index.min(end);
            let rms = rms(&signal[start..end]);
            SegmentRoughness {
                iri: rms.map(|r| r * calibration),
                rms,
                segment,
            }
        })
        .collect()
}

/// Compute per-segment roughness for a cleaned trace.
pub fn calculate(
    samples: &[ProcessedSample],
    duration: f64,
    segment_length: f64,
    config: &RoughnessConfig,
) -> Result<RoughnessOutput> {
    let rate = sampling_rate(samples.len(), duration)?;
    let DistanceProfile {
        distances,
        speed,
        source,
    } = distance_profile(samples, config)?;
    let total_distance = distances.last().copied().unwrap_or(0.0);

    let segments = segment_bounds(&distances, segment_length, config.min_trailing_fraction)?;
    let signal = filtered_signal(samples, config);
    let scored = score_segments(segments, &signal, config.calibration);

    let degenerate = scored.iter().filter(|s| s.iri.is_none()).count();
    if degenerate == scored.len() {
        return Err(IriError::DegenerateSegmentation(format!(
            "none of {} segments contains samples",
            scored.len()
        )));
    }
    if degenerate > 0 {
        log::warn!(
            "{} of {} segments contain no samples (GPS jumps longer than {} m?)",
            degenerate,
            scored.len(),
            segment_length
        );
    }

    Ok(RoughnessOutput {
        segments: scored,
        sampling_rate: rate,
        estimated_speed: speed,
        total_distance,
        distance_source: source,
    })
}
