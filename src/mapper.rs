//! Segment/GPS mapper: attach one representative position to each segment.

use crate::types::{Coordinate, ProcessedSample, Segment};

/// Clamp an index into `[0, len - 1]`; `None` for an empty sequence.
pub fn clamp_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| index.min(len - 1))
}

/// Coordinate of the sample at the segment's (clamped) center index. When
/// that sample carries no fix, the nearest sample inside the segment that
/// does is used instead.
pub fn segment_coordinate(segment: &Segment, samples: &[ProcessedSample]) -> Option<Coordinate> {
    let center = clamp_index(segment.center_index, samples.len())?;
    if let Some(c) = samples[center].coordinate {
        return Some(c);
    }

    let start = segment.start_index.min(samples.len());
    let end = segment.end_index.min(samples.len());
    (start..end)
        .filter_map(|i| samples[i].coordinate.map(|c| (i.abs_diff(center), c)))
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, c)| c)
}

/// Fill `coordinate` on every segment. Without GPS this leaves all of them
/// `None`.
pub fn assign_coordinates(segments: &mut [Segment], samples: &[ProcessedSample]) {
    for segment in segments.iter_mut() {
        segment.coordinate = segment_coordinate(segment, samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(coords: &[Option<(f64, f64)>]) -> Vec<ProcessedSample> {
        coords
            .iter()
            .enumerate()
            .map(|(i, c)| ProcessedSample {
                time: i as f64,
                vertical: 9.81,
                coordinate: c.and_then(|(lat, lon)| Coordinate::new(lat, lon)),
                source_row: i + 1,
            })
            .collect()
    }

    fn segment(start: usize, end: usize, center: usize) -> Segment {
        Segment {
            index: 0,
            start_distance: 0.0,
            length: 25.0,
            start_index: start,
            end_index: end,
            center_index: center,
            coordinate: None,
        }
    }

    #[test]
    fn test_center_sample_coordinate() {
        let s = samples(&[Some((1.0, 1.0)), Some((2.0, 2.0)), Some((3.0, 3.0))]);
        let c = segment_coordinate(&segment(0, 3, 1), &s).unwrap();
        assert_eq!(c.latitude, 2.0);
    }

    #[test]
    fn test_out_of_range_center_clamps() {
        let s = samples(&[Some((1.0, 1.0)), Some((2.0, 2.0))]);
        let c = segment_coordinate(&segment(2, 2, 2), &s).unwrap();
        assert_eq!(c.latitude, 2.0);
    }

    #[test]
    fn test_nearest_fix_inside_segment() {
        let s = samples(&[Some((1.0, 1.0)), None, None, Some((4.0, 4.0)), None]);
        let c = segment_coordinate(&segment(1, 5, 2), &s).unwrap();
        assert_eq!(c.latitude, 4.0);
    }

    #[test]
    fn test_no_gps_leaves_absent() {
        let s = samples(&[None, None, None]);
        let mut segs = vec![segment(0, 3, 1)];
        assign_coordinates(&mut segs, &s);
        assert!(segs[0].coordinate.is_none());
        assert!(clamp_index(0, 0).is_none());
    }
}
