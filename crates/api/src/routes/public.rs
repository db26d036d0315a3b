//! Unauthenticated read-only routes used by the public menu page.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET    /organizations/{organization_id}/menu    published_menu
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/organizations/{organization_id}/menu",
        get(public::published_menu),
    )
}
