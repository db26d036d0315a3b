use axum::extract::{Path, State};
use axum::Json;
use menuboard_core::document::{deserialize_or_template, render_order, RenderEntry, RenderMode};
use menuboard_core::error::CoreError;
use menuboard_core::types::DbId;
use menuboard_db::repositories::MenuRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PublicMenuResponse {
    pub menu_id: DbId,
    pub name: String,
    /// Visible blocks in render order; hidden blocks are omitted.
    pub blocks: Vec<RenderEntry>,
}

/// GET /api/v1/public/organizations/{organization_id}/menu
///
/// 404 when the organization has no published menu.
pub async fn published_menu(
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PublicMenuResponse>>> {
    let menu = MenuRepo::find_published_for_organization(&state.pool, organization_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Published menu for organization",
            id: organization_id,
        }))?;

    let loaded = deserialize_or_template(menu.serial_data.as_deref());
    if let Some(error) = &loaded.error {
        tracing::error!(menu_id = menu.id, %error, "Published document is corrupt");
    }

    Ok(Json(DataResponse {
        data: PublicMenuResponse {
            menu_id: menu.id,
            name: menu.name,
            blocks: render_order(&loaded.document, RenderMode::Public),
        },
    }))
}
