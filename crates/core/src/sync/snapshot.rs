//! Denormalized copies of live menu records, embedded in block props.
//!
//! The same types double as the live-data input of the reconciler, so a
//! snapshot is always "the record as it looked when it was copied".

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Organization fields the header block renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSnapshot {
    pub id: DbId,
    pub name: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub updated_at: Timestamp,
}

impl OrganizationSnapshot {
    /// Compare only what the header renders; `updated_at` is ignored.
    pub fn renders_same_as(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.logo_url == other.logo_url
            && self.banner_url == other.banner_url
    }
}

/// One opening-hours row. `day` is 0 (Monday) through 6 (Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub day: u8,
    pub opens: String,
    pub closes: String,
}

/// Location fields the location block renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub id: DbId,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Vec<OpeningHours>,
    #[serde(default)]
    pub dine_in: bool,
    #[serde(default)]
    pub takeout: bool,
    #[serde(default)]
    pub delivery: bool,
    pub updated_at: Timestamp,
}

impl LocationSnapshot {
    /// Compare only what the location block renders; `updated_at` is ignored.
    pub fn renders_same_as(&self, other: &Self) -> bool {
        self.id == other.id
            && self.address == other.address
            && self.phone == other.phone
            && self.hours == other.hours
            && self.dine_in == other.dine_in
            && self.takeout == other.takeout
            && self.delivery == other.delivery
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSnapshot {
    pub id: DbId,
    pub name: String,
    pub price_cents: i64,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantSnapshot>,
    pub updated_at: Timestamp,
}

impl ItemSnapshot {
    /// `true` when `live` carries the same revision of this item and of
    /// every one of its variants.
    pub fn is_current_with(&self, live: &Self) -> bool {
        if self.id != live.id || self.updated_at != live.updated_at {
            return false;
        }
        if self.variants.len() != live.variants.len() {
            return false;
        }
        self.variants.iter().all(|snap| {
            live.variants
                .iter()
                .any(|v| v.id == snap.id && v.updated_at == snap.updated_at)
        })
    }
}

/// A live category together with the items it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCategory {
    pub category: CategorySnapshot,
    pub items: Vec<ItemSnapshot>,
}

/// Everything the reconciler reads from the relational store for one
/// organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveData {
    pub organization: Option<OrganizationSnapshot>,
    pub location: Option<LocationSnapshot>,
    pub categories: Vec<LiveCategory>,
    /// Every item of the organization, categorized or not.
    pub items: Vec<ItemSnapshot>,
    /// Result of the "featured" query, in display order.
    pub featured: Vec<ItemSnapshot>,
}

impl LiveData {
    pub fn category(&self, id: DbId) -> Option<&LiveCategory> {
        self.categories.iter().find(|c| c.category.id == id)
    }

    pub fn item(&self, id: DbId) -> Option<&ItemSnapshot> {
        self.items.iter().find(|i| i.id == id)
    }
}
