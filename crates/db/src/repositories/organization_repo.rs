//! Repository for the `organizations` table.

use menuboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::organization::{CreateOrganization, Organization, UpdateOrganization};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, logo_url, banner_url, billing_email, created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, logo_url, banner_url, billing_email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .bind(&input.logo_url)
            .bind(&input.banner_url)
            .bind(&input.billing_email)
            .fetch_one(pool)
            .await
    }

    /// Runs on any executor, so it can join a caller's transaction.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all organizations ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Organization>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an organization. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrganization,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!(
            "UPDATE organizations SET
                name = COALESCE($2, name),
                logo_url = COALESCE($3, logo_url),
                banner_url = COALESCE($4, banner_url),
                billing_email = COALESCE($5, billing_email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.logo_url)
            .bind(&input.banner_url)
            .bind(&input.billing_email)
            .fetch_optional(pool)
            .await
    }

    /// Delete an organization and, by cascade, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
