//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Catalog entities also convert into the snapshot types that menu
//! documents embed.

pub mod category;
pub mod location;
pub mod menu;
pub mod menu_item;
pub mod organization;
pub mod status;
