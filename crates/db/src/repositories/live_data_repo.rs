//! Assembles [`LiveData`] for the sync check from the catalog tables.

use async_trait::async_trait;
use menuboard_core::error::CoreError;
use menuboard_core::sync::snapshot::{LiveCategory, LiveData};
use menuboard_core::sync::LiveDataSource;
use menuboard_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, LocationRepo, MenuItemRepo, OrganizationRepo};

/// Reads the current organization, location, categories, and items.
#[derive(Clone)]
pub struct LiveDataRepo {
    pool: PgPool,
}

impl LiveDataRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the live data for one organization.
    ///
    /// All reads share one `REPEATABLE READ` snapshot, so concurrent catalog
    /// edits land either entirely before or entirely after the load.
    /// Category item lists and the featured list keep the catalog's display
    /// order. Each item carries its variants.
    pub async fn load(pool: &PgPool, organization_id: DbId) -> Result<LiveData, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let organization = OrganizationRepo::find_by_id(&mut *tx, organization_id).await?;
        let location = LocationRepo::find_by_organization(&mut *tx, organization_id).await?;
        let categories = CategoryRepo::list_by_organization(&mut *tx, organization_id).await?;
        let items = MenuItemRepo::list_by_organization(&mut *tx, organization_id).await?;
        let variants =
            MenuItemRepo::list_variants_by_organization(&mut *tx, organization_id).await?;

        tx.commit().await?;

        let snapshots: Vec<_> = items.iter().map(|i| i.snapshot(&variants)).collect();

        let featured = items
            .iter()
            .zip(&snapshots)
            .filter(|(item, _)| item.is_featured)
            .map(|(_, snap)| snap.clone())
            .collect();

        let categories = categories
            .iter()
            .map(|category| LiveCategory {
                category: category.snapshot(),
                items: snapshots
                    .iter()
                    .filter(|s| s.category_id == Some(category.id))
                    .cloned()
                    .collect(),
            })
            .collect();

        tracing::debug!(
            organization_id,
            items = snapshots.len(),
            "Loaded live data"
        );

        Ok(LiveData {
            organization: organization.map(|o| o.snapshot()),
            location: location.map(|l| l.snapshot()),
            categories,
            items: snapshots,
            featured,
        })
    }
}

#[async_trait]
impl LiveDataSource for LiveDataRepo {
    async fn fetch_live_data(&self, organization_id: DbId) -> Result<LiveData, CoreError> {
        Self::load(&self.pool, organization_id)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to load live data: {e}")))
    }
}
