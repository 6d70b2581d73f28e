//! Deterministic synthetic sensor traces for tests and demos.
//!
//! Phone lying flat (gravity on z), driving due north at constant speed.
//! Noise is a fixed mix of incommensurate tones so every run is identical.

use std::f64::consts::PI;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::SensorTable;

const GRAVITY: f64 = 9.81;
/// Meters per degree of latitude on a 6371 km sphere
const METERS_PER_DEG_LAT: f64 = 111_195.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GpsTrack {
    pub origin_lat: f64,
    pub origin_lon: f64,
    /// Ground speed the fixes imply; may differ from the nominal speed
    pub speed_mps: f64,
    /// Log a fix every N rows (1 = every row)
    pub fix_every: usize,
}

impl Default for GpsTrack {
    fn default() -> Self {
        Self {
            origin_lat: 14.5995,
            origin_lon: 120.9842,
            speed_mps: 10.0,
            fix_every: 1,
        }
    }
}

/// Extra vertical vibration between two instants.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoughPatch {
    pub start_s: f64,
    pub end_s: f64,
    /// m/s² amplitude of a 6 Hz vibration
    pub amplitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceSpec {
    pub duration_s: f64,
    pub rate_hz: f64,
    /// Peak m/s² of the broadband noise on z
    pub noise_amplitude: f64,
    pub gps: Option<GpsTrack>,
    pub rough_patches: Vec<RoughPatch>,
}

impl Default for TraceSpec {
    fn default() -> Self {
        Self {
            duration_s: 10.0,
            rate_hz: 100.0,
            noise_amplitude: 0.0,
            gps: None,
            rough_patches: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticRow {
    pub time: f64,
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub position: Option<(f64, f64)>,
}

pub struct SyntheticTrace {
    spec: TraceSpec,
}

impl SyntheticTrace {
    pub fn new(spec: TraceSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &TraceSpec {
        &self.spec
    }

    pub fn row_count(&self) -> usize {
        (self.spec.duration_s * self.spec.rate_hz).round() as usize
    }

    fn noise(t: f64) -> f64 {
        0.5 * (2.0 * PI * 7.3 * t).sin()
            + 0.3 * (2.0 * PI * 13.1 * t + 1.0).sin()
            + 0.2 * (2.0 * PI * 23.7 * t + 2.0).sin()
    }

    fn patch_vibration(&self, t: f64) -> f64 {
        self.spec
            .rough_patches
            .iter()
            .filter(|p| t >= p.start_s && t < p.end_s)
            .map(|p| p.amplitude * (2.0 * PI * 6.0 * t).sin())
            .sum()
    }

    pub fn rows(&self) -> Vec<SyntheticRow> {
        (0..self.row_count())
            .map(|i| {
                let t = i as f64 / self.spec.rate_hz;
                let az = GRAVITY
                    + self.spec.noise_amplitude * Self::noise(t)
                    + self.patch_vibration(t);
                let position = self.spec.gps.as_ref().and_then(|gps| {
                    (i % gps.fix_every.max(1) == 0).then(|| {
                        let north_m = gps.speed_mps * t;
                        (gps.origin_lat + north_m / METERS_PER_DEG_LAT, gps.origin_lon)
                    })
                });
                SyntheticRow {
                    time: t,
                    ax: 0.0,
                    ay: 0.0,
                    az,
                    position,
                }
            })
            .collect()
    }

    fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["time", "ax", "ay", "az"];
        if self.spec.gps.is_some() {
            headers.extend(["lat", "lon"]);
        }
        headers
    }

    fn record(&self, row: &SyntheticRow) -> Vec<String> {
        let mut record = vec![
            format!("{:.4}", row.time),
            format!("{}", row.ax),
            format!("{}", row.ay),
            format!("{}", row.az),
        ];
        if self.spec.gps.is_some() {
            match row.position {
                Some((lat, lon)) => {
                    record.push(format!("{:.8}", lat));
                    record.push(format!("{:.8}", lon));
                }
                None => record.extend([String::new(), String::new()]),
            }
        }
        record
    }

    pub fn to_table(&self) -> SensorTable {
        let rows: Vec<Vec<String>> = self.rows().iter().map(|r| self.record(r)).collect();
        SensorTable::from_rows(self.headers(), rows)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.headers())?;
        for row in self.rows() {
            csv.write_record(self.record(&row))?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count_and_headers() {
        let trace = SyntheticTrace::new(TraceSpec::default());
        let table = trace.to_table();
        assert_eq!(table.len(), 1000);
        assert_eq!(table.headers(), &["time", "ax", "ay", "az"]);
        assert_eq!(table.cell(999, 0), Some("9.9900"));
    }

    #[test]
    fn test_sparse_fixes() {
        let spec = TraceSpec {
            duration_s: 1.0,
            rate_hz: 10.0,
            gps: Some(GpsTrack {
                fix_every: 5,
                ..Default::default()
            }),
            ..Default::default()
        };
        let rows = SyntheticTrace::new(spec).rows();
        let fixes = rows.iter().filter(|r| r.position.is_some()).count();
        assert_eq!(fixes, 2);
    }

    #[test]
    fn test_deterministic() {
        let spec = TraceSpec {
            noise_amplitude: 0.4,
            ..Default::default()
        };
        assert_eq!(
            SyntheticTrace::new(spec.clone()).rows(),
            SyntheticTrace::new(spec).rows()
        );
    }

    #[test]
    fn test_csv_roundtrip_through_table() {
        let spec = TraceSpec {
            duration_s: 0.5,
            gps: Some(GpsTrack::default()),
            ..Default::default()
        };
        let mut buf = Vec::new();
        SyntheticTrace::new(spec).write_csv(&mut buf).unwrap();
        let table = SensorTable::from_bytes(&buf).unwrap();
        assert_eq!(table.len(), 50);
        assert_eq!(table.headers().len(), 6);
    }
}
