//! Buildings and floors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A building served by the deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub total_floors: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Building {
    pub fn new(building_id: impl Into<String>, name: impl Into<String>, total_floors: u32) -> Self {
        let now = Utc::now();
        Self {
            building_id: building_id.into(),
            name: name.into(),
            description: None,
            address: None,
            total_floors,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A floor of a building, with its map extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub floor_id: String,
    pub building_id: String,
    pub floor_number: i32,
    pub name: String,
    /// Map width in map units.
    pub width: u32,
    /// Map height in map units.
    pub height: u32,
    /// Map units per metre.
    pub scale: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Floor {
    pub fn new(
        floor_id: impl Into<String>,
        building_id: impl Into<String>,
        floor_number: i32,
        name: impl Into<String>,
        width: u32,
        height: u32,
        scale: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            floor_id: floor_id.into(),
            building_id: building_id.into(),
            floor_number,
            name: name.into(),
            width,
            height,
            scale,
            created_at: now,
            updated_at: now,
        }
    }
}
