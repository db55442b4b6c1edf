//! Position estimates.

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// How a coordinate estimate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMethod {
    /// Single matched beacon: its registered position, verbatim.
    Nearest,
    /// RSSI-weighted centroid of the matched beacon positions.
    Weighted,
    /// Three-circle intersection from path-loss distance estimates.
    Trilateration,
}

impl std::fmt::Display for PositionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Nearest => "nearest",
            Self::Weighted => "weighted",
            Self::Trilateration => "trilateration",
        };
        f.write_str(label)
    }
}

/// A usable position fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub building_id: String,
    pub building_name: String,
    pub floor_id: String,
    pub floor_name: String,
    pub floor_number: i32,
    pub position: Point,
    pub method: PositionMethod,
    /// How many beacons actually entered the estimate.
    pub beacons_used: usize,
}

/// Outcome of a positioning request.
///
/// Domain failures are values, not errors: an invalid estimate carries a
/// human-readable reason instead of a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PositionEstimate {
    Fix(PositionFix),
    Invalid { reason: String },
}

impl PositionEstimate {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid { reason: reason.into() }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Fix(_))
    }

    pub fn fix(&self) -> Option<&PositionFix> {
        match self {
            Self::Fix(fix) => Some(fix),
            Self::Invalid { .. } => None,
        }
    }
}
