//! Handlers for organization-scoped menu collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use menuboard_core::document::deserialize;
use menuboard_core::error::CoreError;
use menuboard_core::types::DbId;
use menuboard_db::models::menu::{CreateMenu, Menu};
use menuboard_db::repositories::{MenuRepo, OrganizationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /organizations/{id}/menus`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMenuRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Optional initial document blob; must decode if given.
    pub serial_data: Option<String>,
}

async fn ensure_organization(state: &AppState, id: DbId) -> AppResult<()> {
    OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id,
        }))?;
    Ok(())
}

/// GET /api/v1/organizations/{organization_id}/menus
pub async fn list_menus(
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Menu>>>> {
    ensure_organization(&state, organization_id).await?;
    let menus = MenuRepo::list_by_organization(&state.pool, organization_id).await?;
    Ok(Json(DataResponse { data: menus }))
}

/// POST /api/v1/organizations/{organization_id}/menus
///
/// Creates a draft menu. A supplied `serial_data` blob is rejected with 400
/// if it does not decode.
pub async fn create_menu(
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
    Json(input): Json<CreateMenuRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Menu>>)> {
    input.validate()?;
    ensure_organization(&state, organization_id).await?;

    if let Some(blob) = input.serial_data.as_deref() {
        deserialize(blob)?;
    }

    let menu = MenuRepo::create(
        &state.pool,
        &CreateMenu {
            organization_id,
            name: input.name.trim().to_string(),
            serial_data: input.serial_data,
        },
    )
    .await?;

    tracing::info!(menu_id = menu.id, organization_id, "Menu created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: menu })))
}
