//! Menuboard core domain logic.
//!
//! This crate has zero internal dependencies and no I/O. It holds the menu
//! document tree, its mutation reducer and editor session, the blob codec,
//! and the staleness comparison / reconciliation against live menu data.

pub mod document;
pub mod error;
pub mod sync;
pub mod types;
