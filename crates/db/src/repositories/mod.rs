//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. [`LiveDataRepo`] is the
//! exception: it owns a pool so it can serve as a `LiveDataSource`.

pub mod category_repo;
pub mod live_data_repo;
pub mod location_repo;
pub mod menu_item_repo;
pub mod menu_repo;
pub mod organization_repo;

pub use category_repo::CategoryRepo;
pub use live_data_repo::LiveDataRepo;
pub use location_repo::LocationRepo;
pub use menu_item_repo::MenuItemRepo;
pub use menu_repo::MenuRepo;
pub use organization_repo::OrganizationRepo;
