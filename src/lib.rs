//! Road roughness (IRI) estimation from smartphone accelerometer traces.
//!
//! A trace goes through three stages: [`preprocess`] cleans the table into a
//! time-ordered vertical channel, [`roughness`] scores fixed-length distance
//! segments, and [`mapper`] pins each segment to a GPS position. The
//! [`estimator::IriEstimator`] composes them and aggregates the result.

pub mod cache;
pub mod columns;
pub mod config;
pub mod distance;
pub mod error;
pub mod estimator;
pub mod filters;
pub mod mapper;
pub mod preprocess;
pub mod quality;
pub mod roughness;
pub mod stats;
pub mod synthetic;
pub mod table;
pub mod types;

pub use cache::{CacheKey, IriCache};
pub use config::{DistanceMode, EstimatorConfig, PreprocessConfig, RoughnessConfig, VerticalAxis};
pub use error::{IriError, Result};
pub use estimator::{estimate_iri, IriEstimator};
pub use quality::RoadQuality;
pub use table::SensorTable;
pub use types::{DataQualityReport, IriResult, Segment, SegmentRoughness};
