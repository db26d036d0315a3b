//! Repository for the `menu_items` and `variants` tables.

use menuboard_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::menu_item::{
    CreateMenuItem, CreateVariant, MenuItem, UpdateMenuItem, UpdateVariant, Variant,
};

const COLUMNS: &str = "id, organization_id, category_id, name, description, price_cents, \
    image_url, is_featured, position, created_at, updated_at";

const VARIANT_COLUMNS: &str = "id, menu_item_id, name, price_cents, created_at, updated_at";

/// Provides CRUD operations for menu items and their variants.
pub struct MenuItemRepo;

impl MenuItemRepo {
    // ── Items ────────────────────────────────────────────────────────

    /// Insert a new menu item. `is_featured` defaults to `false`,
    /// `position` to `0`.
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items
                (organization_id, category_id, name, description, price_cents,
                 image_url, is_featured, position)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, false), COALESCE($8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(input.organization_id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every item of an organization, categorized or not, in display order.
    pub async fn list_by_organization<'e>(
        executor: impl PgExecutor<'e>,
        organization_id: DbId,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE organization_id = $1
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(organization_id)
            .fetch_all(executor)
            .await
    }

    /// List the items of one category in display order.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items
             WHERE category_id = $1
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a menu item. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET
                category_id = COALESCE($2, category_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price_cents = COALESCE($5, price_cents),
                image_url = COALESCE($6, image_url),
                is_featured = COALESCE($7, is_featured),
                position = COALESCE($8, position)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(&input.image_url)
            .bind(input.is_featured)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    /// Move an item into a category, or out of every category with `None`.
    pub async fn set_category(
        pool: &PgPool,
        id: DbId,
        category_id: Option<DbId>,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET category_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item and its variants. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Variants ─────────────────────────────────────────────────────

    pub async fn create_variant(
        pool: &PgPool,
        input: &CreateVariant,
    ) -> Result<Variant, sqlx::Error> {
        let query = format!(
            "INSERT INTO variants (menu_item_id, name, price_cents)
             VALUES ($1, $2, $3)
             RETURNING {VARIANT_COLUMNS}"
        );
        sqlx::query_as::<_, Variant>(&query)
            .bind(input.menu_item_id)
            .bind(&input.name)
            .bind(input.price_cents)
            .fetch_one(pool)
            .await
    }

    pub async fn update_variant(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVariant,
    ) -> Result<Option<Variant>, sqlx::Error> {
        let query = format!(
            "UPDATE variants SET
                name = COALESCE($2, name),
                price_cents = COALESCE($3, price_cents)
             WHERE id = $1
             RETURNING {VARIANT_COLUMNS}"
        );
        sqlx::query_as::<_, Variant>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price_cents)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_variant(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM variants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All variants of all items of an organization, ordered by item then id.
    pub async fn list_variants_by_organization<'e>(
        executor: impl PgExecutor<'e>,
        organization_id: DbId,
    ) -> Result<Vec<Variant>, sqlx::Error> {
        sqlx::query_as::<_, Variant>(
            "SELECT v.id, v.menu_item_id, v.name, v.price_cents, v.created_at, v.updated_at
             FROM variants v
             JOIN menu_items i ON i.id = v.menu_item_id
             WHERE i.organization_id = $1
             ORDER BY v.menu_item_id ASC, v.id ASC",
        )
        .bind(organization_id)
        .fetch_all(executor)
        .await
    }
}
