//! End-to-end IRI estimation: preprocess, calculate, map, aggregate.
//!
//! Pure function of (table, configuration). Intermediate arrays stay inside
//! this module; callers get an [`IriResult`] or an [`IriError`], never a
//! partial result.

use crate::config::EstimatorConfig;
use crate::error::{IriError, Result};
use crate::mapper::assign_coordinates;
use crate::preprocess::preprocess;
use crate::quality::RoadQuality;
use crate::roughness::calculate;
use crate::stats::{mean, std_dev};
use crate::table::SensorTable;
use crate::types::{IriResult, Segment, SegmentRoughness};

#[derive(Clone, Debug, Default)]
pub struct IriEstimator {
    config: EstimatorConfig,
}

impl IriEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn estimate(&self, table: &SensorTable) -> Result<IriResult> {
        let trace = preprocess(table, &self.config.preprocess)?;
        let output = calculate(
            &trace.samples,
            trace.duration,
            self.config.segment_length_m,
            &self.config.roughness,
        )?;

        let mut segments: Vec<Segment> = output
            .segments
            .iter()
            .map(|s| s.segment.clone())
            .collect();
        assign_coordinates(&mut segments, &trace.samples);
        let segments: Vec<SegmentRoughness> = output
            .segments
            .into_iter()
            .zip(segments)
            .map(|(scored, segment)| SegmentRoughness { segment, ..scored })
            .collect();

        let values: Vec<f64> = segments.iter().filter_map(|s| s.iri).collect();
        if values.is_empty() {
            return Err(IriError::DegenerateSegmentation(
                "no segment produced a roughness value".into(),
            ));
        }
        let mean_iri = mean(&values);
        let std_iri = std_dev(&values);
        let quality = RoadQuality::classify(mean_iri);

        log::info!(
            "IRI {:.2} ± {:.2} m/km ({}) over {} segments, {:.1} m in {:.1} s",
            mean_iri,
            std_iri,
            quality,
            segments.len(),
            output.total_distance,
            trace.duration
        );

        Ok(IriResult {
            segments,
            mean_iri,
            std_iri,
            quality,
            sampling_rate: output.sampling_rate,
            estimated_speed: output.estimated_speed,
            duration: trace.duration,
            total_distance: output.total_distance,
            distance_source: output.distance_source,
            vertical_channel: trace.vertical_channel,
            report: trace.report,
        })
    }
}

/// One-shot convenience wrapper around [`IriEstimator`].
pub fn estimate_iri(table: &SensorTable, config: &EstimatorConfig) -> Result<IriResult> {
    IriEstimator::new(config.clone())?.estimate(table)
}
