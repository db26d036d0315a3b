//! Handlers for the `/menus` resource: document load/save, sync check and
//! repair, and the publication gate.
//!
//! Sync repair never writes to storage. `POST /menus/{id}/sync` hands back
//! the repaired document and its blob; the editor saves it explicitly.

use axum::extract::{Path, State};
use axum::Json;
use menuboard_core::document::codec::{from_json, to_json};
use menuboard_core::document::{deserialize, deserialize_or_template, serialize};
use menuboard_core::error::CoreError;
use menuboard_core::sync::{check_sync_from, sync_from, SyncVerdict};
use menuboard_core::types::DbId;
use menuboard_db::models::menu::Menu;
use menuboard_db::repositories::MenuRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::find_menu;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A decoded menu document.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub menu_id: DbId,
    /// The document in its serialized JSON form (keyed by node id).
    pub document: Value,
    /// `true` when the stored blob was corrupt and the template was
    /// returned instead. The stored blob is left untouched.
    pub recovered: bool,
    pub error: Option<String>,
}

/// Request body for `PUT /menus/{id}/document`. Exactly one field is set.
#[derive(Debug, Deserialize)]
pub struct SaveDocumentRequest {
    /// An encoded blob, stored as-is once it is known to decode.
    pub serial_data: Option<String>,
    /// The document in its JSON form; encoded server-side.
    pub document: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub menu_id: DbId,
    pub in_sync: bool,
    pub verdict: SyncVerdict,
    /// `true` when the stored blob was corrupt and the verdict is for the
    /// template instead.
    pub recovered: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub menu_id: DbId,
    /// `false` when the document was already in sync.
    pub changed: bool,
    pub document: Value,
    pub serial_data: String,
    /// `true` when the stored blob was corrupt and the template was
    /// reconciled instead.
    pub recovered: bool,
}

/// GET /api/v1/menus/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let menu = find_menu(&state, id).await?;
    Ok(Json(DataResponse { data: menu }))
}

/// GET /api/v1/menus/{id}/document
///
/// A menu that was never saved yields the template. A corrupt blob also
/// yields the template, flagged with `recovered`.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DocumentResponse>>> {
    let menu = find_menu(&state, id).await?;
    let loaded = deserialize_or_template(menu.serial_data.as_deref());
    if let Some(error) = &loaded.error {
        tracing::warn!(menu_id = id, %error, "Stored document is corrupt, serving template");
    }

    Ok(Json(DataResponse {
        data: DocumentResponse {
            menu_id: id,
            document: to_json(&loaded.document)?,
            recovered: loaded.recovered,
            error: loaded.error,
        },
    }))
}

/// PUT /api/v1/menus/{id}/document
///
/// Rejects blobs and documents that do not decode into a valid tree, so a
/// corrupt save never overwrites a good stored document.
pub async fn save_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveDocumentRequest>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let blob = match (input.serial_data, input.document) {
        (Some(blob), None) => {
            deserialize(&blob)?;
            blob
        }
        (None, Some(document)) => serialize(&from_json(document)?)?,
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of 'serial_data' or 'document'".into(),
            ))
        }
    };

    let menu = MenuRepo::save_serial_data(&state.pool, id, &blob)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Menu", id }))?;

    tracing::debug!(menu_id = id, bytes = blob.len(), "Menu document saved");
    Ok(Json(DataResponse { data: menu }))
}

/// GET /api/v1/menus/{id}/sync
///
/// Returns 503 when the live data cannot be read; no verdict is guessed.
pub async fn check_sync(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SyncStatusResponse>>> {
    let menu = find_menu(&state, id).await?;
    let loaded = deserialize_or_template(menu.serial_data.as_deref());

    let verdict =
        check_sync_from(state.live_data.as_ref(), menu.organization_id, &loaded.document).await?;

    Ok(Json(DataResponse {
        data: SyncStatusResponse {
            menu_id: id,
            in_sync: verdict.is_in_sync(),
            verdict,
            recovered: loaded.recovered,
        },
    }))
}

/// POST /api/v1/menus/{id}/sync
///
/// Reconciles the stored document against live data and returns the result
/// without saving it.
pub async fn sync_now(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SyncResponse>>> {
    let menu = find_menu(&state, id).await?;
    let loaded = deserialize_or_template(menu.serial_data.as_deref());

    let synced = sync_from(state.live_data.as_ref(), menu.organization_id, &loaded.document).await?;
    let changed = synced != loaded.document;
    tracing::info!(
        menu_id = id,
        changed,
        recovered = loaded.recovered,
        "Menu document reconciled"
    );

    Ok(Json(DataResponse {
        data: SyncResponse {
            menu_id: id,
            changed,
            document: to_json(&synced)?,
            serial_data: serialize(&synced)?,
            recovered: loaded.recovered,
        },
    }))
}

/// POST /api/v1/menus/{id}/publish
///
/// Makes this the organization's only published menu.
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let menu = MenuRepo::publish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Menu", id }))?;
    Ok(Json(DataResponse { data: menu }))
}

/// POST /api/v1/menus/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Menu>>> {
    let menu = MenuRepo::unpublish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Menu", id }))?;
    tracing::info!(menu_id = id, "Menu unpublished");
    Ok(Json(DataResponse { data: menu }))
}
