use axum::routing::get;
use axum::Router;

use crate::handlers::organizations;
use crate::state::AppState;

/// Routes mounted at `/organizations`.
///
/// ```text
/// GET    /{organization_id}/menus     list_menus
/// POST   /{organization_id}/menus     create_menu
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{organization_id}/menus",
        get(organizations::list_menus).post(organizations::create_menu),
    )
}
