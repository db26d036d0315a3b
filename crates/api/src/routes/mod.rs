pub mod health;
pub mod menus;
pub mod organizations;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /organizations/{id}/menus               list, create
///
/// /menus/{id}                             get
/// /menus/{id}/document                    load, save
/// /menus/{id}/sync                        check (GET), reconcile (POST)
/// /menus/{id}/publish                     publish (POST)
/// /menus/{id}/unpublish                   unpublish (POST)
///
/// /public/organizations/{id}/menu         published menu, public render order
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/organizations", organizations::router())
        .nest("/menus", menus::router())
        .nest("/public", public::router())
}
