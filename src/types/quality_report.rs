//! Data-quality bookkeeping for rows the preprocessor refuses.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    UnparseableTime,
    UnparseableAcceleration,
    NonFiniteValue,
    DuplicateTimestamp,
    OutOfOrderTimestamp,
}

impl DropReason {
    pub const ALL: [DropReason; 5] = [
        DropReason::UnparseableTime,
        DropReason::UnparseableAcceleration,
        DropReason::NonFiniteValue,
        DropReason::DuplicateTimestamp,
        DropReason::OutOfOrderTimestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::UnparseableTime => "unparseable_time",
            DropReason::UnparseableAcceleration => "unparseable_acceleration",
            DropReason::NonFiniteValue => "non_finite_value",
            DropReason::DuplicateTimestamp => "duplicate_timestamp",
            DropReason::OutOfOrderTimestamp => "out_of_order_timestamp",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// 1-based data row (header excluded)
    pub row: usize,
    pub reason: DropReason,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub total_rows: usize,
    pub dropped: Vec<DroppedRow>,
    /// Rows kept without a position because lat/lon were unusable
    pub invalid_coordinates: usize,
}

impl DataQualityReport {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Default::default()
        }
    }

    pub fn drop_row(&mut self, row: usize, reason: DropReason) {
        self.dropped.push(DroppedRow { row, reason });
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn count(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|d| d.reason == reason).count()
    }

    pub fn kept_rows(&self) -> usize {
        self.total_rows.saturating_sub(self.dropped.len())
    }

    /// One-line summary for logs, e.g. `3 of 120 rows dropped (duplicate_timestamp=2, ...)`
    pub fn summary(&self) -> String {
        let parts: Vec<String> = DropReason::ALL
            .iter()
            .filter_map(|r| {
                let n = self.count(*r);
                (n > 0).then(|| format!("{}={}", r.as_str(), n))
            })
            .collect();
        if parts.is_empty() {
            format!("0 of {} rows dropped", self.total_rows)
        } else {
            format!(
                "{} of {} rows dropped ({})",
                self.dropped_count(),
                self.total_rows,
                parts.join(", ")
            )
        }
    }
}
