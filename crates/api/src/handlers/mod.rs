pub mod menus;
pub mod organizations;
pub mod public;

use menuboard_core::error::CoreError;
use menuboard_core::types::DbId;
use menuboard_db::models::menu::Menu;
use menuboard_db::repositories::MenuRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a menu or fail with a 404.
pub(crate) async fn find_menu(state: &AppState, id: DbId) -> AppResult<Menu> {
    MenuRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Menu", id }))
}
