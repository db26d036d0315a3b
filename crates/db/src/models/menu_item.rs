//! Menu item and variant entity models and DTOs.

use menuboard_core::sync::snapshot::{ItemSnapshot, VariantSnapshot};
use menuboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub organization_id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MenuItem {
    /// The item as blocks embed it, with the given variants attached.
    pub fn snapshot(&self, variants: &[Variant]) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            category_id: self.category_id,
            name: self.name.clone(),
            description: self.description.clone(),
            price_cents: self.price_cents,
            image_url: self.image_url.clone(),
            variants: variants
                .iter()
                .filter(|v| v.menu_item_id == self.id)
                .map(Variant::snapshot)
                .collect(),
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a new menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItem {
    pub organization_id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub position: Option<i32>,
}

/// DTO for updating a menu item. All fields optional.
///
/// `category_id` cannot be cleared through this DTO; use
/// `MenuItemRepo::set_category` for that.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItem {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub position: Option<i32>,
}

/// A row from the `variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Variant {
    pub id: DbId,
    pub menu_item_id: DbId,
    pub name: String,
    pub price_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Variant {
    pub fn snapshot(&self) -> VariantSnapshot {
        VariantSnapshot {
            id: self.id,
            name: self.name.clone(),
            price_cents: self.price_cents,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for adding a variant to a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVariant {
    pub menu_item_id: DbId,
    pub name: String,
    pub price_cents: i64,
}

/// DTO for updating a variant. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVariant {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
}
