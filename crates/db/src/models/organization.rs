//! Organization entity model and DTOs.

use menuboard_core::sync::snapshot::OrganizationSnapshot;
use menuboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub billing_email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Organization {
    /// The header block's copy of this organization.
    pub fn snapshot(&self) -> OrganizationSnapshot {
        OrganizationSnapshot {
            id: self.id,
            name: self.name.clone(),
            logo_url: self.logo_url.clone(),
            banner_url: self.banner_url.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a new organization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub billing_email: Option<String>,
}

/// DTO for updating an organization. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub billing_email: Option<String>,
}
