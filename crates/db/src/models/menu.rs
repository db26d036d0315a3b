//! Menu entity model and DTOs.

use menuboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::{MenuStatus, StatusId};

/// A row from the `menus` table.
///
/// `serial_data` holds the encoded document; it is `None` until the menu is
/// first saved from the editor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Menu {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub status_id: StatusId,
    pub serial_data: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Menu {
    pub fn status(&self) -> Option<MenuStatus> {
        MenuStatus::from_id(self.status_id)
    }

    pub fn is_published(&self) -> bool {
        self.status() == Some(MenuStatus::Published)
    }
}

/// DTO for creating a new menu. New menus always start as drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenu {
    pub organization_id: DbId,
    pub name: String,
    pub serial_data: Option<String>,
}
