//! Preprocessor: raw sensor table to a cleaned vertical-acceleration trace.
//!
//! Rows are coerced one by one; anything that fails is dropped and recorded
//! in the [`DataQualityReport`] instead of aborting the run. The vertical
//! channel and the acceleration unit are decided once per trip.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use nalgebra::Vector3;

use crate::columns::{self, AccelColumns, ResolvedColumns};
use crate::config::{PreprocessConfig, TimeBase, TimeUnit, VerticalAxis};
use crate::error::{IriError, Result};
use crate::stats::median;
use crate::table::SensorTable;
use crate::types::{
    AccelUnit, Coordinate, DataQualityReport, DropReason, ProcessedSample, ProcessedTrace,
    RawAccel, RawSample, VerticalChannel,
};

pub const MIN_SAMPLES: usize = 2;
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Acceleration magnitudes in this band are read as multiples of g.
const G_UNIT_BAND: (f64, f64) = (0.5, 2.0);
/// Time-unit detection assumes the logger ran at no more than this rate and
/// picks the coarsest unit that keeps the median step under it.
pub const MAX_PLAUSIBLE_RATE_HZ: f64 = 500.0;
/// Below this rate a trace cannot resolve road vibration.
pub const MIN_ROUGHNESS_RATE_HZ: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TimeCell {
    Numeric(f64),
    /// Already seconds since the Unix epoch
    DateTime(f64),
    NonFinite,
    Invalid,
}

fn parse_time_cell(cell: Option<&str>) -> TimeCell {
    let Some(text) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return TimeCell::Invalid;
    };
    if let Ok(v) = text.parse::<f64>() {
        return if v.is_finite() {
            TimeCell::Numeric(v)
        } else {
            TimeCell::NonFinite
        };
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return TimeCell::DateTime(epoch_seconds(dt.timestamp(), dt.timestamp_subsec_nanos()));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            let dt = Utc.from_utc_datetime(&naive);
            return TimeCell::DateTime(epoch_seconds(dt.timestamp(), dt.timestamp_subsec_nanos()));
        }
    }
    TimeCell::Invalid
}

fn epoch_seconds(secs: i64, nanos: u32) -> f64 {
    secs as f64 + nanos as f64 * 1e-9
}

enum CellValue {
    Value(f64),
    NonFinite,
    Invalid,
}

fn parse_numeric(cell: Option<&str>) -> CellValue {
    match cell.map(str::trim).filter(|s| !s.is_empty()) {
        None => CellValue::Invalid,
        Some(text) => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Value(v),
            Ok(_) => CellValue::NonFinite,
            Err(_) => CellValue::Invalid,
        },
    }
}

fn median_positive_delta(raw_times: &[f64]) -> Option<f64> {
    let deltas: Vec<f64> = raw_times
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .collect();
    median(&deltas)
}

/// Sampling rate a raw timestamp step implies when read in `unit`.
pub fn implied_sampling_rate(raw_step: f64, unit: TimeUnit) -> f64 {
    1.0 / (raw_step * unit.seconds_per_unit())
}

/// Resolve `TimeUnit::Auto` from the median positive delta of the numeric
/// timestamps, in file order: ns, µs and ms are tried in that order and the
/// first one whose implied rate stays at or under [`MAX_PLAUSIBLE_RATE_HZ`]
/// wins, otherwise seconds.
pub fn detect_time_unit(raw_times: &[f64]) -> TimeUnit {
    let Some(step) = median_positive_delta(raw_times) else {
        return TimeUnit::Seconds;
    };
    [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
    ]
    .into_iter()
    .find(|u| implied_sampling_rate(step, *u) <= MAX_PLAUSIBLE_RATE_HZ)
    .unwrap_or(TimeUnit::Seconds)
}

/// Warning text when the detected unit gives a rate too coarse for
/// roughness, which usually means the unit guess is wrong.
pub fn time_unit_warning(raw_times: &[f64], unit: TimeUnit) -> Option<String> {
    let step = median_positive_delta(raw_times)?;
    let rate = implied_sampling_rate(step, unit);
    (rate < MIN_ROUGHNESS_RATE_HZ).then(|| {
        format!(
            "timestamps read as {:?} give {:.3} Hz (median step {}); set the time unit explicitly if this is wrong",
            unit, rate, step
        )
    })
}

/// Resolve `AccelUnit::Auto` from the median acceleration magnitude of
/// triaxial samples, where gravity puts it near 1 g or 9.8 m/s². A single
/// vertical column usually has gravity removed, so its magnitude says
/// nothing about the unit and it is read as m/s².
pub fn detect_accel_unit(samples: &[RawSample]) -> AccelUnit {
    let magnitudes: Vec<f64> = samples
        .iter()
        .filter(|s| matches!(s.accel, RawAccel::Triaxial { .. }))
        .map(|s| s.accel.magnitude())
        .collect();
    match median(&magnitudes) {
        Some(m) if (G_UNIT_BAND.0..=G_UNIT_BAND.1).contains(&m) => AccelUnit::StandardGravity,
        _ => AccelUnit::MetersPerSecondSquared,
    }
}

/// Parse and clean every row. Returns surviving samples in file order with
/// strictly increasing timestamps.
pub fn parse_raw_samples(
    table: &SensorTable,
    cols: &ResolvedColumns,
    time_unit: TimeUnit,
    report: &mut DataQualityReport,
) -> Vec<RawSample> {
    let time_cells: Vec<TimeCell> = (0..table.len())
        .map(|r| parse_time_cell(table.cell(r, cols.time)))
        .collect();

    let unit = match time_unit {
        TimeUnit::Auto => {
            let numeric: Vec<f64> = time_cells
                .iter()
                .filter_map(|c| match c {
                    TimeCell::Numeric(v) => Some(*v),
                    _ => None,
                })
                .collect();
            let detected = detect_time_unit(&numeric);
            log::debug!("time unit auto-detected as {:?}", detected);
            if let Some(warning) = time_unit_warning(&numeric, detected) {
                log::warn!("preprocess: {}", warning);
            }
            detected
        }
        other => other,
    };
    let scale = unit.seconds_per_unit();

    let mut samples: Vec<RawSample> = Vec::with_capacity(table.len());
    for (r, time_cell) in time_cells.into_iter().enumerate() {
        let row = r + 1;
        let timestamp = match time_cell {
            TimeCell::Numeric(v) => v * scale,
            TimeCell::DateTime(v) => v,
            TimeCell::NonFinite => {
                report.drop_row(row, DropReason::NonFiniteValue);
                continue;
            }
            TimeCell::Invalid => {
                report.drop_row(row, DropReason::UnparseableTime);
                continue;
            }
        };

        let accel = match parse_accel(table, r, cols.accel) {
            Ok(a) => a,
            Err(reason) => {
                report.drop_row(row, reason);
                continue;
            }
        };

        if let Some(last) = samples.last() {
            if timestamp == last.timestamp {
                report.drop_row(row, DropReason::DuplicateTimestamp);
                continue;
            }
            if timestamp < last.timestamp {
                report.drop_row(row, DropReason::OutOfOrderTimestamp);
                continue;
            }
        }

        let coordinate = cols.gps.and_then(|gps| {
            let lat = table.cell(r, gps.latitude).map(str::trim).unwrap_or("");
            let lon = table.cell(r, gps.longitude).map(str::trim).unwrap_or("");
            if lat.is_empty() && lon.is_empty() {
                // no fix logged on this row
                return None;
            }
            let parsed = match (lat.parse::<f64>(), lon.parse::<f64>()) {
                (Ok(la), Ok(lo)) => Coordinate::new(la, lo),
                _ => None,
            };
            if parsed.is_none() {
                report.invalid_coordinates += 1;
            }
            parsed
        });

        samples.push(RawSample {
            timestamp,
            accel,
            coordinate,
            row,
        });
    }

    samples
}

fn parse_accel(
    table: &SensorTable,
    r: usize,
    cols: AccelColumns,
) -> std::result::Result<RawAccel, DropReason> {
    let value = |c: usize| match parse_numeric(table.cell(r, c)) {
        CellValue::Value(v) => Ok(v),
        CellValue::NonFinite => Err(DropReason::NonFiniteValue),
        CellValue::Invalid => Err(DropReason::UnparseableAcceleration),
    };
    match cols {
        AccelColumns::Triaxial { x, y, z } => Ok(RawAccel::Triaxial {
            x: value(x)?,
            y: value(y)?,
            z: value(z)?,
        }),
        AccelColumns::Vertical(v) => Ok(RawAccel::Vertical(value(v)?)),
    }
}

/// Decide the vertical channel for the whole trip and extract it.
pub fn select_vertical(samples: &[RawSample], axis: VerticalAxis) -> (VerticalChannel, Vec<f64>) {
    let vectors: Option<Vec<Vector3<f64>>> = samples
        .iter()
        .map(|s| match s.accel {
            RawAccel::Triaxial { x, y, z } => Some(Vector3::new(x, y, z)),
            RawAccel::Vertical(_) => None,
        })
        .collect();

    let Some(vectors) = vectors else {
        let values = samples
            .iter()
            .map(|s| match s.accel {
                RawAccel::Vertical(v) => v,
                RawAccel::Triaxial { z, .. } => z,
            })
            .collect();
        return (VerticalChannel::SingleColumn, values);
    };

    let mean = vectors.iter().sum::<Vector3<f64>>() / vectors.len().max(1) as f64;
    let channel = match axis {
        VerticalAxis::X => VerticalChannel::X,
        VerticalAxis::Y => VerticalChannel::Y,
        VerticalAxis::Z => VerticalChannel::Z,
        VerticalAxis::Dominant => dominant_axis(&mean),
        VerticalAxis::GravityProjection => match mean.try_normalize(1e-9) {
            Some(_) => VerticalChannel::GravityProjection,
            None => {
                log::warn!("mean acceleration is zero, cannot project on gravity; using z");
                VerticalChannel::Z
            }
        },
    };

    let up = mean.try_normalize(1e-9).unwrap_or_else(Vector3::z);
    let values = vectors
        .iter()
        .map(|a| match channel {
            VerticalChannel::X => a.x,
            VerticalChannel::Y => a.y,
            VerticalChannel::GravityProjection => a.dot(&up),
            VerticalChannel::Z | VerticalChannel::SingleColumn => a.z,
        })
        .collect();
    (channel, values)
}

/// Axis with the largest |mean|; ties prefer z, then y.
fn dominant_axis(mean: &Vector3<f64>) -> VerticalChannel {
    let (ax, ay, az) = (mean.x.abs(), mean.y.abs(), mean.z.abs());
    if az >= ax && az >= ay {
        VerticalChannel::Z
    } else if ay >= ax {
        VerticalChannel::Y
    } else {
        VerticalChannel::X
    }
}

/// Resample to `n` evenly spaced instants over `[0, duration]`. The vertical
/// channel is linearly interpolated; coordinates and source rows come from
/// the nearest original sample in time.
pub fn resample_uniform(samples: &[ProcessedSample], duration: f64) -> Vec<ProcessedSample> {
    let n = samples.len();
    if n < 2 {
        return samples.to_vec();
    }
    let step = duration / (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    let mut j = 0;
    for k in 0..n {
        let t = if k == n - 1 { duration } else { k as f64 * step };
        while j + 2 < n && samples[j + 1].time <= t {
            j += 1;
        }
        let (a, b) = (&samples[j], &samples[j + 1]);
        let span = b.time - a.time;
        let frac = if span > 0.0 {
            ((t - a.time) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let nearest = if frac <= 0.5 { a } else { b };
        out.push(ProcessedSample {
            time: t,
            vertical: a.vertical + frac * (b.vertical - a.vertical),
            coordinate: nearest.coordinate,
            source_row: nearest.source_row,
        });
    }
    out
}

/// Clean and convert a raw sensor table.
///
/// Fails with `Schema` when required columns are missing, and with
/// `InsufficientData` when fewer than [`MIN_SAMPLES`] rows survive or the
/// trip has no positive duration.
pub fn preprocess(table: &SensorTable, config: &PreprocessConfig) -> Result<ProcessedTrace> {
    let cols = columns::resolve(table.headers())?;
    let mut report = DataQualityReport::new(table.len());

    let mut raw = parse_raw_samples(table, &cols, config.time_unit, &mut report);
    if report.dropped_count() > 0 {
        log::warn!("preprocess: {}", report.summary());
    }
    if report.invalid_coordinates > 0 {
        log::warn!(
            "preprocess: {} rows with unusable coordinates kept without position",
            report.invalid_coordinates
        );
    }

    if raw.len() < MIN_SAMPLES {
        return Err(IriError::InsufficientData(format!(
            "{} usable samples after cleaning, need at least {} ({})",
            raw.len(),
            MIN_SAMPLES,
            report.summary()
        )));
    }

    let first = raw[0].timestamp;
    let duration = raw[raw.len() - 1].timestamp - first;
    if !(duration > 0.0) {
        return Err(IriError::InsufficientData(format!(
            "non-positive trip duration {duration}"
        )));
    }

    let unit = match config.accel_unit {
        AccelUnit::Auto => detect_accel_unit(&raw),
        other => other,
    };
    if unit == AccelUnit::StandardGravity {
        for s in raw.iter_mut() {
            s.accel = s.accel.scaled(STANDARD_GRAVITY);
        }
    }

    let (vertical_channel, vertical) = select_vertical(&raw, config.vertical_axis);
    let mut samples: Vec<ProcessedSample> = raw
        .iter()
        .zip(vertical)
        .map(|(s, v)| ProcessedSample {
            time: s.timestamp - first,
            vertical: v,
            coordinate: s.coordinate,
            source_row: s.row,
        })
        .collect();

    if config.time_base == TimeBase::Uniform {
        samples = resample_uniform(&samples, duration);
    }

    let has_gps = samples.iter().any(|s| s.coordinate.is_some());
    log::debug!(
        "preprocess: {} samples over {:.2}s, channel {:?}, unit {:?}, gps {}",
        samples.len(),
        duration,
        vertical_channel,
        unit,
        has_gps
    );

    Ok(ProcessedTrace {
        samples,
        duration,
        vertical_channel,
        unit,
        has_gps,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> SensorTable {
        SensorTable::from_rows(
            headers.iter().copied(),
            rows.iter().map(|r| r.iter().copied()),
        )
    }

    #[test]
    fn test_basic_trace() {
        let t = table(
            &["time", "ax", "ay", "az"],
            &[
                &["0.0", "0", "0", "9.81"],
                &["0.5", "0", "0", "9.91"],
                &["1.0", "0", "0", "9.71"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.len(), 3);
        assert_abs_diff_eq!(trace.duration, 1.0, epsilon = 1e-12);
        assert_eq!(trace.vertical_channel, VerticalChannel::Z);
        assert_eq!(trace.unit, AccelUnit::MetersPerSecondSquared);
        assert_eq!(trace.samples[1].vertical, 9.91);
        assert!(!trace.has_gps);
    }

    #[test]
    fn test_single_row_is_insufficient() {
        let t = table(&["time", "ax", "ay", "az"], &[&["0.0", "0", "0", "9.81"]]);
        let err = preprocess(&t, &PreprocessConfig::default()).unwrap_err();
        assert!(matches!(err, IriError::InsufficientData(_)));
    }

    #[test]
    fn test_missing_columns_is_schema_error() {
        let t = table(&["time", "speed"], &[&["0", "1"], &["1", "1"]]);
        let err = preprocess(&t, &PreprocessConfig::default()).unwrap_err();
        assert!(matches!(err, IriError::Schema(_)));
    }

    #[test]
    fn test_drops_are_reported_by_reason() {
        let t = table(
            &["time", "ax", "ay", "az"],
            &[
                &["0.0", "0", "0", "9.8"],
                &["abc", "0", "0", "9.8"],
                &["0.1", "0", "oops", "9.8"],
                &["0.2", "0", "0", "NaN"],
                &["0.2", "0", "0", "9.8"],
                &["0.3", "0", "0", "9.8"],
                &["0.3", "0", "0", "9.8"],
                &["0.25", "0", "0", "9.8"],
                &["0.4", "0", "0", "9.8"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        let report = &trace.report;

        assert_eq!(report.total_rows, 9);
        assert_eq!(report.count(DropReason::UnparseableTime), 1);
        assert_eq!(report.count(DropReason::UnparseableAcceleration), 1);
        assert_eq!(report.count(DropReason::NonFiniteValue), 1);
        assert_eq!(report.count(DropReason::DuplicateTimestamp), 1);
        assert_eq!(report.count(DropReason::OutOfOrderTimestamp), 1);
        assert_eq!(trace.len(), 4);

        // survivors keep file order and strictly increasing time
        let rows: Vec<usize> = trace.samples.iter().map(|s| s.source_row).collect();
        assert_eq!(rows, vec![1, 5, 6, 9]);
        assert!(trace.samples.windows(2).all(|w| w[1].time > w[0].time));
    }

    #[test]
    fn test_invalid_utf8_cell_is_a_counted_drop() {
        let mut bytes = b"time,ax,ay,az\n0.0,0,0,9.8\n0.1,0,0,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\n0.2,0,0,9.8\n0.3,0,0,9.7\n");
        let t = SensorTable::from_bytes(&bytes).unwrap();

        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.report.count(DropReason::UnparseableAcceleration), 1);
        assert_eq!(trace.report.dropped[0].row, 2);
    }

    #[test]
    fn test_millisecond_timestamps_detected() {
        let t = table(
            &["timestamp", "ax", "ay", "az"],
            &[
                &["1700000000000", "0", "0", "9.8"],
                &["1700000000010", "0", "0", "9.8"],
                &["1700000000020", "0", "0", "9.8"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_abs_diff_eq!(trace.duration, 0.02, epsilon = 1e-6);
    }

    #[test]
    fn test_nanosecond_timestamps_detected() {
        assert_eq!(
            detect_time_unit(&[0.0, 1e7, 2e7, 3e7]),
            TimeUnit::Nanoseconds
        );
        assert_eq!(detect_time_unit(&[0.0, 0.01, 0.02]), TimeUnit::Seconds);
        assert_eq!(detect_time_unit(&[0.0, 20.0, 40.0]), TimeUnit::Milliseconds);
    }

    #[test]
    fn test_microsecond_timestamps_detected() {
        // 100 Hz in µs used to be read as ns
        assert_eq!(
            detect_time_unit(&[0.0, 1e4, 2e4, 3e4]),
            TimeUnit::Microseconds
        );
        assert_abs_diff_eq!(
            implied_sampling_rate(1e4, TimeUnit::Microseconds),
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_coarse_time_base_warns() {
        assert!(time_unit_warning(&[0.0, 0.5, 1.0, 1.5], TimeUnit::Seconds).is_some());
        assert!(time_unit_warning(&[0.0, 0.01, 0.02], TimeUnit::Seconds).is_none());
        assert!(time_unit_warning(&[0.0, 10.0, 20.0], TimeUnit::Milliseconds).is_none());
        assert!(time_unit_warning(&[], TimeUnit::Seconds).is_none());
    }

    #[test]
    fn test_datetime_timestamps() {
        let t = table(
            &["time", "vertical_accel"],
            &[
                &["2024-03-01T08:00:00Z", "0.1"],
                &["2024-03-01T08:00:00.500Z", "0.2"],
                &["2024-03-01 08:00:01.250", "0.3"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_abs_diff_eq!(trace.duration, 1.25, epsilon = 1e-6);
        assert_eq!(trace.vertical_channel, VerticalChannel::SingleColumn);
    }

    #[test]
    fn test_g_units_converted() {
        let t = table(
            &["time", "x", "y", "z"],
            &[&["0", "0", "0", "1.0"], &["1", "0", "0", "1.1"]],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.unit, AccelUnit::StandardGravity);
        assert_abs_diff_eq!(trace.samples[0].vertical, STANDARD_GRAVITY, epsilon = 1e-12);
    }

    #[test]
    fn test_gravity_removed_vertical_column_is_not_g() {
        // ±1 m/s² road vibration with gravity already subtracted
        let times: Vec<String> = (0..200).map(|i| format!("{:.2}", i as f64 * 0.01)).collect();
        let rows: Vec<Vec<String>> = times
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let v = if i % 2 == 0 { "1.0" } else { "-1.0" };
                vec![t.clone(), v.to_string()]
            })
            .collect();
        let t = SensorTable::from_rows(["time", "vertical_accel"], rows);
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.unit, AccelUnit::MetersPerSecondSquared);
        assert_eq!(trace.samples[0].vertical, 1.0);
        assert_eq!(trace.samples[1].vertical, -1.0);
    }

    #[test]
    fn test_dominant_axis_follows_gravity() {
        // phone lying on its side: gravity on y
        let t = table(
            &["time", "ax", "ay", "az"],
            &[
                &["0", "0.2", "-9.8", "0.3"],
                &["1", "0.1", "-9.7", "0.2"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.vertical_channel, VerticalChannel::Y);
        assert_eq!(trace.samples[0].vertical, -9.8);
    }

    #[test]
    fn test_gravity_projection() {
        let raw = vec![
            RawSample {
                timestamp: 0.0,
                accel: RawAccel::Triaxial {
                    x: 0.0,
                    y: 6.0,
                    z: 8.0,
                },
                coordinate: None,
                row: 1,
            },
            RawSample {
                timestamp: 1.0,
                accel: RawAccel::Triaxial {
                    x: 0.0,
                    y: 6.0,
                    z: 8.0,
                },
                coordinate: None,
                row: 2,
            },
        ];
        let (channel, values) = select_vertical(&raw, VerticalAxis::GravityProjection);
        assert_eq!(channel, VerticalChannel::GravityProjection);
        assert_abs_diff_eq!(values[0], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coordinates_sparse_and_invalid() {
        let t = table(
            &["time", "az", "ax", "ay", "latitude", "longitude"],
            &[
                &["0", "9.8", "0", "0", "", ""],
                &["1", "9.8", "0", "0", "0", "0"],
                &["2", "9.8", "0", "0", "14.6", "121.0"],
                &["3", "9.8", "0", "0", "north", "121.0"],
            ],
        );
        let trace = preprocess(&t, &PreprocessConfig::default()).unwrap();
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.gps_fix_count(), 1);
        assert_eq!(trace.report.invalid_coordinates, 2);
        assert!(trace.has_gps);
    }

    #[test]
    fn test_uniform_time_base() {
        let t = table(
            &["time", "vertical_accel"],
            &[
                &["0.0", "0.0"],
                &["0.1", "1.0"],
                &["0.5", "2.0"],
                &["0.9", "0.0"],
            ],
        );
        let config = PreprocessConfig {
            time_base: TimeBase::Uniform,
            ..Default::default()
        };
        let trace = preprocess(&t, &config).unwrap();
        assert_eq!(trace.len(), 4);
        let times: Vec<f64> = trace.samples.iter().map(|s| s.time).collect();
        assert_abs_diff_eq!(times[1], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(times[3], 0.9, epsilon = 1e-12);
        // 0.3 lies halfway between 0.1 (1.0) and 0.5 (2.0)
        assert_abs_diff_eq!(trace.samples[1].vertical, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(trace.samples[3].vertical, 0.0, epsilon = 1e-12);
    }
}
