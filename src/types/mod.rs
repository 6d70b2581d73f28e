pub mod quality_report;

pub use quality_report::{DataQualityReport, DropReason, DroppedRow};

use serde::{Deserialize, Serialize};

use crate::quality::RoadQuality;

/// WGS84 position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values and the (0, 0)
    /// placeholder phones log before the first GPS lock.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
            return None;
        }
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawAccel {
    Triaxial { x: f64, y: f64, z: f64 },
    Vertical(f64),
}

impl RawAccel {
    pub fn magnitude(&self) -> f64 {
        match *self {
            RawAccel::Triaxial { x, y, z } => (x * x + y * y + z * z).sqrt(),
            RawAccel::Vertical(v) => v.abs(),
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        match *self {
            RawAccel::Triaxial { x, y, z } => RawAccel::Triaxial {
                x: x * factor,
                y: y * factor,
                z: z * factor,
            },
            RawAccel::Vertical(v) => RawAccel::Vertical(v * factor),
        }
    }
}

/// One sensor reading as parsed from the input table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawSample {
    /// Absolute timestamp in seconds (device epoch or elapsed, unit-converted)
    pub timestamp: f64,
    pub accel: RawAccel,
    pub coordinate: Option<Coordinate>,
    /// 1-based data row in the source table
    pub row: usize,
}

/// A cleaned sample on a validated (or uniform) time base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSample {
    /// Seconds since the first surviving sample
    pub time: f64,
    /// Vertical acceleration in m/s², gravity included
    pub vertical: f64,
    pub coordinate: Option<Coordinate>,
    pub source_row: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalChannel {
    X,
    Y,
    Z,
    GravityProjection,
    SingleColumn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AccelUnit {
    Auto,
    MetersPerSecondSquared,
    StandardGravity,
}

/// Output of the preprocessor. Owned by the estimator; never handed out
/// partially.
#[derive(Clone, Debug)]
pub struct ProcessedTrace {
    pub samples: Vec<ProcessedSample>,
    pub duration: f64,
    pub vertical_channel: VerticalChannel,
    pub unit: AccelUnit,
    pub has_gps: bool,
    pub report: DataQualityReport,
}

impl ProcessedTrace {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn gps_fix_count(&self) -> usize {
        self.samples.iter().filter(|s| s.coordinate.is_some()).count()
    }
}

/// Which distance axis the segments are referenced against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    ConstantSpeed,
    Gps,
}

/// Fixed-length span of the traveled path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    /// Meters from trip origin
    pub start_distance: f64,
    pub length: f64,
    /// First sample in the segment
    pub start_index: usize,
    /// One past the last sample in the segment
    pub end_index: usize,
    pub center_index: usize,
    pub coordinate: Option<Coordinate>,
}

impl Segment {
    pub fn end_distance(&self) -> f64 {
        self.start_distance + self.length
    }

    pub fn sample_count(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_degenerate(&self) -> bool {
        self.sample_count() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRoughness {
    pub segment: Segment,
    /// m/km; `None` for segments without samples
    pub iri: Option<f64>,
    pub rms: Option<f64>,
}

/// Final product of one estimator run. Read-only for consumers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IriResult {
    pub segments: Vec<SegmentRoughness>,
    pub mean_iri: f64,
    pub std_iri: f64,
    pub quality: RoadQuality,
    /// Hz
    pub sampling_rate: f64,
    /// m/s
    pub estimated_speed: f64,
    /// seconds
    pub duration: f64,
    /// meters
    pub total_distance: f64,
    pub distance_source: DistanceSource,
    pub vertical_channel: VerticalChannel,
    pub report: DataQualityReport,
}

impl IriResult {
    /// Scored values in segment order, skipping degenerate segments.
    pub fn iri_values(&self) -> Vec<f64> {
        self.segments.iter().filter_map(|s| s.iri).collect()
    }

    pub fn coordinates(&self) -> Vec<Option<Coordinate>> {
        self.segments.iter().map(|s| s.segment.coordinate).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
