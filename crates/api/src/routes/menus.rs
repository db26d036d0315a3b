use axum::routing::{get, post};
use axum::Router;

use crate::handlers::menus;
use crate::state::AppState;

/// Routes mounted at `/menus`.
///
/// ```text
/// GET    /{id}               get_by_id
/// GET    /{id}/document      get_document
/// PUT    /{id}/document      save_document
/// GET    /{id}/sync          check_sync
/// POST   /{id}/sync          sync_now
/// POST   /{id}/publish       publish
/// POST   /{id}/unpublish     unpublish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(menus::get_by_id))
        .route(
            "/{id}/document",
            get(menus::get_document).put(menus::save_document),
        )
        .route("/{id}/sync", get(menus::check_sync).post(menus::sync_now))
        .route("/{id}/publish", post(menus::publish))
        .route("/{id}/unpublish", post(menus::unpublish))
}
