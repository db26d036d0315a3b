//! Location entity model and DTOs. Each organization has at most one.

use menuboard_core::sync::snapshot::{LocationSnapshot, OpeningHours};
use menuboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub organization_id: DbId,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Json<Vec<OpeningHours>>,
    pub dine_in: bool,
    pub takeout: bool,
    pub delivery: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Location {
    /// The location block's copy of this location.
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            id: self.id,
            address: self.address.clone(),
            phone: self.phone.clone(),
            hours: self.hours.0.clone(),
            dine_in: self.dine_in,
            takeout: self.takeout,
            delivery: self.delivery,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating an organization's location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub organization_id: DbId,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Vec<OpeningHours>,
    pub dine_in: Option<bool>,
    pub takeout: Option<bool>,
    pub delivery: Option<bool>,
}

/// DTO for updating a location. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocation {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<Vec<OpeningHours>>,
    pub dine_in: Option<bool>,
    pub takeout: Option<bool>,
    pub delivery: Option<bool>,
}
