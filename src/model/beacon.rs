//! Registered beacons and transient scan observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// iBeacon identifier triple. Unique across the whole deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeaconId {
    /// Proximity UUID, e.g. `"E2C56DB5-DFFB-48D2-B060-D0F5A71096E0"`.
    pub uuid: String,
    pub major: u16,
    pub minor: u16,
}

impl BeaconId {
    pub fn new(uuid: impl Into<String>, major: u16, minor: u16) -> Self {
        Self { uuid: uuid.into(), major, minor }
    }

    /// Same triple with the UUID upper-cased.
    pub fn to_uppercase(&self) -> Self {
        Self { uuid: self.uuid.to_uppercase(), ..self.clone() }
    }

    /// Same triple with the UUID lower-cased.
    pub fn to_lowercase(&self) -> Self {
        Self { uuid: self.uuid.to_lowercase(), ..self.clone() }
    }
}

impl std::fmt::Display for BeaconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.uuid, self.major, self.minor)
    }
}

/// A beacon registered at a known position on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub building_id: String,
    pub floor_id: String,
    pub id: BeaconId,
    pub position: Point,
    /// Expected RSSI at 1 m, in dBm. A stored value of exactly 0 means
    /// "uncalibrated" and is replaced by [`Beacon::DEFAULT_TX_POWER`] when
    /// inverting RSSI into distance.
    pub tx_power: f64,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Beacon {
    /// Calibration default: expected RSSI at 1 m.
    pub const DEFAULT_TX_POWER: f64 = -59.0;

    pub fn new(
        building_id: impl Into<String>,
        floor_id: impl Into<String>,
        id: BeaconId,
        position: Point,
    ) -> Self {
        Self {
            building_id: building_id.into(),
            floor_id: floor_id.into(),
            id,
            position,
            tx_power: Self::DEFAULT_TX_POWER,
            label: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_tx_power(mut self, dbm: f64) -> Self {
        self.tx_power = dbm;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Calibration constant to use when inverting RSSI into distance.
    pub fn calibrated_tx_power(&self) -> f64 {
        if self.tx_power == 0.0 {
            Self::DEFAULT_TX_POWER
        } else {
            self.tx_power
        }
    }
}

/// One observation from a mobile scan. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedBeacon {
    pub id: BeaconId,
    /// Signal strength in dBm; closer to 0 is stronger.
    pub rssi: i32,
}

impl ScannedBeacon {
    pub fn new(id: BeaconId, rssi: i32) -> Self {
        Self { id, rssi }
    }
}
