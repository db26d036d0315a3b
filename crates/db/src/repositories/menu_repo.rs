//! Repository for the `menus` table, including the publication gate.

use menuboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu::{CreateMenu, Menu};
use crate::models::status::MenuStatus;

const COLUMNS: &str = "id, organization_id, name, status_id, serial_data, created_at, updated_at";

/// Provides CRUD and publication operations for menus.
pub struct MenuRepo;

impl MenuRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new draft menu.
    pub async fn create(pool: &PgPool, input: &CreateMenu) -> Result<Menu, sqlx::Error> {
        let query = format!(
            "INSERT INTO menus (organization_id, name, status_id, serial_data)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(MenuStatus::Draft.id())
            .bind(&input.serial_data)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menus WHERE id = $1");
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an organization's menus, most recently updated first.
    pub async fn list_by_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Menu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menus
             WHERE organization_id = $1
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the stored document blob. Returns `None` if the menu does not exist.
    pub async fn save_serial_data(
        pool: &PgPool,
        id: DbId,
        serial_data: &str,
    ) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!("UPDATE menus SET serial_data = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .bind(serial_data)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Publication ──────────────────────────────────────────────────

    /// The organization's published menu, if any.
    pub async fn find_published_for_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menus WHERE organization_id = $1 AND status_id = $2"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(organization_id)
            .bind(MenuStatus::Published.id())
            .fetch_optional(pool)
            .await
    }

    /// Publish a menu, demoting any other published menu of the same
    /// organization to draft in the same transaction.
    ///
    /// The organization row is locked first, so concurrent publishes for one
    /// organization run one after the other and the last one wins. The
    /// partial unique index `uq_menus_one_published_per_organization` backs
    /// the invariant if the lock is ever bypassed.
    ///
    /// Returns `None` if the menu or its organization does not exist.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Menu>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let organization: Option<(DbId,)> = sqlx::query_as(
            "SELECT o.id FROM organizations o \
             JOIN menus m ON m.organization_id = o.id \
             WHERE m.id = $1 \
             FOR UPDATE OF o",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((organization_id,)) = organization else {
            tx.rollback().await?;
            return Ok(None);
        };

        let demoted = sqlx::query(
            "UPDATE menus SET status_id = $1 \
             WHERE organization_id = $2 AND status_id = $3 AND id <> $4",
        )
        .bind(MenuStatus::Draft.id())
        .bind(organization_id)
        .bind(MenuStatus::Published.id())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!("UPDATE menus SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let menu = sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .bind(MenuStatus::Published.id())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            menu_id = id,
            organization_id,
            demoted = demoted.rows_affected(),
            "Menu published"
        );
        Ok(menu)
    }

    /// Return a menu to draft. Returns `None` if the menu does not exist.
    pub async fn unpublish(pool: &PgPool, id: DbId) -> Result<Option<Menu>, sqlx::Error> {
        let query = format!("UPDATE menus SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .bind(MenuStatus::Draft.id())
            .fetch_optional(pool)
            .await
    }
}
