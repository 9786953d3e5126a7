//! # Framework Errors
//!
//! Errors shared by every actor and client. Entity hook failures travel boxed in
//! [`FrameworkError::EntityError`] so callers can still downcast to the entity's own type.

#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor has stopped and no longer accepts requests.
    #[error("actor closed")]
    ActorClosed,
    /// The request was accepted but never answered.
    #[error("actor dropped the response channel")]
    ActorDropped,
    #[error("entity not found: {0}")]
    NotFound(String),
    /// Another entity already holds the same [`unique_key`](crate::ActorEntity::unique_key).
    #[error("unique key already taken: {0}")]
    Conflict(String),
    #[error("entity rejected the request: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
