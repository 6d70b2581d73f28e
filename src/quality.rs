use serde::{Deserialize, Serialize};

/// Upper IRI bounds (m/km, inclusive) for Good, Fair and Poor.
pub const GOOD_MAX_IRI: f64 = 3.0;
pub const FAIR_MAX_IRI: f64 = 5.0;
pub const POOR_MAX_IRI: f64 = 7.0;

/// Four-level road condition banding of a mean IRI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoadQuality {
    Good,
    Fair,
    Poor,
    Bad,
}

impl RoadQuality {
    /// ≤3 Good, ≤5 Fair, ≤7 Poor, otherwise Bad. NaN falls through to Bad.
    pub fn classify(iri: f64) -> Self {
        if iri <= GOOD_MAX_IRI {
            RoadQuality::Good
        } else if iri <= FAIR_MAX_IRI {
            RoadQuality::Fair
        } else if iri <= POOR_MAX_IRI {
            RoadQuality::Poor
        } else {
            RoadQuality::Bad
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoadQuality::Good => "Good",
            RoadQuality::Fair => "Fair",
            RoadQuality::Poor => "Poor",
            RoadQuality::Bad => "Bad",
        }
    }

    /// Map color used for path segments
    pub fn color(&self) -> &'static str {
        match self {
            RoadQuality::Good => "#2ecc71",  // green
            RoadQuality::Fair => "#f1c40f",  // yellow
            RoadQuality::Poor => "#e67e22",  // orange
            RoadQuality::Bad => "#e74c3c",   // red
        }
    }
}

impl std::fmt::Display for RoadQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
