//! Staleness detection and repair of embedded snapshots.
//!
//! Blocks embed copies of live records (organization, location, categories,
//! items). [`compare`] decides whether those copies have drifted from the
//! live data; [`reconcile`] rewrites the drifted ones. Neither ever touches
//! storage: the repaired document is handed back to the caller.

pub mod compare;
pub mod reconcile;
pub mod snapshot;
pub mod source;

pub use compare::{check_sync, stale_nodes, Freshness, StaleNode, SyncVerdict};
pub use reconcile::{plan_repairs, sync_document};
pub use snapshot::LiveData;
pub use source::{check_sync_from, sync_from, LiveDataSource};

use crate::document::TreeError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The live data could not be fetched. The document was not examined
    /// or changed, and no verdict is available.
    #[error("Live data unavailable: {0}")]
    LiveDataUnavailable(String),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
