//! Column-name resolution.
//!
//! Sensor-logging apps disagree on header names. Every component resolves
//! columns through [`COLUMN_ALIASES`]; names are compared case-insensitively
//! after trimming. Within one role the first alias found wins.
//!
//! Acceleration fallback order: all three axes, then a single vertical
//! column, otherwise a schema error. GPS is used only when both latitude and
//! longitude resolve.

use crate::error::{IriError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    Time,
    AccelX,
    AccelY,
    AccelZ,
    Vertical,
    Latitude,
    Longitude,
}

pub const COLUMN_ALIASES: &[(ColumnRole, &[&str])] = &[
    (
        ColumnRole::Time,
        &["time", "timestamp", "seconds_elapsed", "time_s", "t"],
    ),
    (ColumnRole::AccelX, &["ax", "accel_x", "acc_x", "x"]),
    (ColumnRole::AccelY, &["ay", "accel_y", "acc_y", "y"]),
    (ColumnRole::AccelZ, &["az", "accel_z", "acc_z", "z"]),
    (
        ColumnRole::Vertical,
        &[
            "vertical_accel",
            "vertical_acceleration",
            "acc_vertical",
            "av",
        ],
    ),
    (ColumnRole::Latitude, &["lat", "latitude"]),
    (ColumnRole::Longitude, &["lon", "lng", "long", "longitude"]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelColumns {
    Triaxial { x: usize, y: usize, z: usize },
    Vertical(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpsColumns {
    pub latitude: usize,
    pub longitude: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub time: usize,
    pub accel: AccelColumns,
    pub gps: Option<GpsColumns>,
}

pub fn aliases(role: ColumnRole) -> &'static [&'static str] {
    COLUMN_ALIASES
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Index of the first header matching any alias of `role`.
pub fn find(headers: &[String], role: ColumnRole) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    aliases(role)
        .iter()
        .find_map(|alias| normalized.iter().position(|h| h == alias))
}

pub fn resolve(headers: &[String]) -> Result<ResolvedColumns> {
    let time = find(headers, ColumnRole::Time).ok_or_else(|| {
        IriError::Schema(format!(
            "no time column (tried {:?}) in headers {:?}",
            aliases(ColumnRole::Time),
            headers
        ))
    })?;

    let axes = (
        find(headers, ColumnRole::AccelX),
        find(headers, ColumnRole::AccelY),
        find(headers, ColumnRole::AccelZ),
    );
    let accel = match axes {
        (Some(x), Some(y), Some(z)) => AccelColumns::Triaxial { x, y, z },
        _ => match find(headers, ColumnRole::Vertical) {
            Some(v) => AccelColumns::Vertical(v),
            None => {
                return Err(IriError::Schema(format!(
                    "no acceleration columns: need x/y/z axes {:?}/{:?}/{:?} or a vertical column {:?}",
                    aliases(ColumnRole::AccelX),
                    aliases(ColumnRole::AccelY),
                    aliases(ColumnRole::AccelZ),
                    aliases(ColumnRole::Vertical)
                )))
            }
        },
    };

    let gps = match (
        find(headers, ColumnRole::Latitude),
        find(headers, ColumnRole::Longitude),
    ) {
        (Some(latitude), Some(longitude)) => Some(GpsColumns {
            latitude,
            longitude,
        }),
        _ => None,
    };

    Ok(ResolvedColumns { time, accel, gps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_triaxial_with_gps() {
        let cols = resolve(&headers(&["Time", "ax", "ay", "az", "Latitude", "lon"])).unwrap();
        assert_eq!(cols.time, 0);
        assert_eq!(cols.accel, AccelColumns::Triaxial { x: 1, y: 2, z: 3 });
        assert_eq!(
            cols.gps,
            Some(GpsColumns {
                latitude: 4,
                longitude: 5
            })
        );
    }

    #[test]
    fn test_alias_priority_within_role() {
        // "time" beats "seconds_elapsed" regardless of column order
        let cols = resolve(&headers(&["seconds_elapsed", "x", "y", "z", "time"])).unwrap();
        assert_eq!(cols.time, 4);
    }

    #[test]
    fn test_falls_back_to_vertical_column() {
        let cols = resolve(&headers(&["timestamp", "ax", "vertical_accel"])).unwrap();
        assert_eq!(cols.accel, AccelColumns::Vertical(2));
        assert!(cols.gps.is_none());
    }

    #[test]
    fn test_lat_without_lon_disables_gps() {
        let cols = resolve(&headers(&["t", "x", "y", "z", "lat"])).unwrap();
        assert!(cols.gps.is_none());
    }

    #[test]
    fn test_missing_time_is_schema_error() {
        let err = resolve(&headers(&["ax", "ay", "az"])).unwrap_err();
        assert!(matches!(err, IriError::Schema(_)));
    }

    #[test]
    fn test_missing_accel_is_schema_error() {
        let err = resolve(&headers(&["time", "lat", "lon"])).unwrap_err();
        assert!(matches!(err, IriError::Schema(_)));
        assert_eq!(err.kind(), "schema_error");
    }
}
