//! Repository for the `locations` table.

use menuboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::location::{CreateLocation, Location, UpdateLocation};

const COLUMNS: &str = "id, organization_id, address, phone, hours, \
    dine_in, takeout, delivery, created_at, updated_at";

/// Provides CRUD operations for organization locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert the organization's location. Fails with a unique violation
    /// (`uq_locations_organization_id`) if it already has one.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations
                (organization_id, address, phone, hours, dine_in, takeout, delivery)
             VALUES ($1, $2, $3, $4, COALESCE($5, false), COALESCE($6, false), COALESCE($7, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.organization_id)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(Json(&input.hours))
            .bind(input.dine_in)
            .bind(input.takeout)
            .bind(input.delivery)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The organization's location, if it has one.
    pub async fn find_by_organization<'e>(
        executor: impl PgExecutor<'e>,
        organization_id: DbId,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE organization_id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(organization_id)
            .fetch_optional(executor)
            .await
    }

    /// Update a location. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                address = COALESCE($2, address),
                phone = COALESCE($3, phone),
                hours = COALESCE($4, hours),
                dine_in = COALESCE($5, dine_in),
                takeout = COALESCE($6, takeout),
                delivery = COALESCE($7, delivery)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(input.hours.as_ref().map(Json))
            .bind(input.dine_in)
            .bind(input.takeout)
            .bind(input.delivery)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
