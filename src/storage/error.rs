use resource_actor::FrameworkError;
use thiserror::Error;

/// Failure reported by a storage collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("record not found: {0}")]
    NotFound(String),

    /// A uniqueness rule was violated. Carries the contested key.
    #[error("unique key already taken: {0}")]
    Conflict(String),

    /// A store-level rule refused the write.
    #[error("rejected by store: {0}")]
    Rejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<FrameworkError> for StorageError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => StorageError::NotFound(id),
            FrameworkError::Conflict(key) => StorageError::Conflict(key),
            FrameworkError::EntityError(e) => StorageError::Rejected(e.to_string()),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                StorageError::Unavailable(e.to_string())
            }
        }
    }
}
