use crate::document::{CodecError, TreeError};
use crate::sync::SyncError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upstream dependency could not be reached. Callers may retry.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TreeError> for CoreError {
    fn from(err: TreeError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<CodecError> for CoreError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Corrupt(_) => CoreError::Validation(err.to_string()),
            CodecError::Encode(_) => CoreError::Internal(err.to_string()),
        }
    }
}

impl From<SyncError> for CoreError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::LiveDataUnavailable(msg) => {
                CoreError::Unavailable(format!("Could not check sync status: {msg}"))
            }
            SyncError::Tree(tree) => tree.into(),
        }
    }
}
