//! Distance referencing: maps every processed sample to meters traveled
//! since the trip origin.
//!
//! Precedence in `DistanceMode::Auto`: GPS whenever at least two samples
//! carry a fix, constant nominal speed otherwise.

use geo::{HaversineDistance, Point};

use crate::config::{DistanceMode, RoughnessConfig};
use crate::error::{IriError, Result};
use crate::types::{Coordinate, DistanceSource, ProcessedSample};

#[derive(Clone, Debug)]
pub struct DistanceProfile {
    /// Meters from origin, one per sample, non-decreasing
    pub distances: Vec<f64>,
    /// m/s
    pub speed: f64,
    pub source: DistanceSource,
}

impl DistanceProfile {
    pub fn total(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }
}

pub fn haversine_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let pa = Point::new(a.longitude, a.latitude);
    let pb = Point::new(b.longitude, b.latitude);
    pa.haversine_distance(&pb)
}

/// distance[i] = distance[i-1] + speed · Δt
pub fn constant_speed_distances(times: &[f64], speed: f64) -> Vec<f64> {
    let mut distances = Vec::with_capacity(times.len());
    let mut acc = 0.0;
    let mut prev = times.first().copied().unwrap_or(0.0);
    for t in times {
        acc += speed * (t - prev).max(0.0);
        prev = *t;
        distances.push(acc);
    }
    distances
}

/// Cumulative haversine distance between consecutive fixes, linearly
/// interpolated in time for samples between fixes. Samples before the first
/// fix sit at 0, samples after the last hold its value.
///
/// Returns the distances and the mean speed between first and last fix, or
/// `None` with fewer than two fixes.
pub fn gps_distances(samples: &[ProcessedSample]) -> Option<(Vec<f64>, f64)> {
    let fixes: Vec<(usize, Coordinate)> = samples
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.coordinate.map(|c| (i, c)))
        .collect();
    if fixes.len() < 2 {
        return None;
    }

    let mut fix_distance = Vec::with_capacity(fixes.len());
    let mut acc = 0.0;
    fix_distance.push(0.0);
    for pair in fixes.windows(2) {
        acc += haversine_m(&pair[0].1, &pair[1].1);
        fix_distance.push(acc);
    }

    let mut distances = vec![0.0; samples.len()];
    for (k, pair) in fixes.windows(2).enumerate() {
        let (ia, ib) = (pair[0].0, pair[1].0);
        let (ta, tb) = (samples[ia].time, samples[ib].time);
        let (da, db) = (fix_distance[k], fix_distance[k + 1]);
        for i in ia..ib {
            let frac = if tb > ta {
                (samples[i].time - ta) / (tb - ta)
            } else {
                0.0
            };
            distances[i] = da + frac * (db - da);
        }
    }
    let (last_fix, _) = fixes[fixes.len() - 1];
    for d in distances.iter_mut().skip(last_fix) {
        *d = acc;
    }

    let span = samples[last_fix].time - samples[fixes[0].0].time;
    let speed = if span > 0.0 { acc / span } else { 0.0 };
    Some((distances, speed))
}

/// Build the distance axis for a trace.
///
/// Fails with `InsufficientData` when GPS is forced but unavailable, or the
/// speed estimate is not strictly positive.
pub fn distance_profile(
    samples: &[ProcessedSample],
    config: &RoughnessConfig,
) -> Result<DistanceProfile> {
    let gps = match config.distance_mode {
        DistanceMode::ConstantSpeed => None,
        DistanceMode::Auto => gps_distances(samples),
        DistanceMode::Gps => Some(gps_distances(samples).ok_or_else(|| {
            IriError::InsufficientData("GPS distance requested but fewer than 2 fixes".into())
        })?),
    };

    let profile = match gps {
        Some((distances, speed)) => DistanceProfile {
            distances,
            speed,
            source: DistanceSource::Gps,
        },
        None => {
            let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
            DistanceProfile {
                distances: constant_speed_distances(&times, config.nominal_speed_mps),
                speed: config.nominal_speed_mps,
                source: DistanceSource::ConstantSpeed,
            }
        }
    };

    if !(profile.speed.is_finite() && profile.speed > 0.0) {
        return Err(IriError::InsufficientData(format!(
            "estimated speed {} m/s is not positive ({:?})",
            profile.speed, profile.source
        )));
    }

    log::debug!(
        "distance: {:.1} m at {:.2} m/s from {:?}",
        profile.total(),
        profile.speed,
        profile.source
    );
    Ok(profile)
}
