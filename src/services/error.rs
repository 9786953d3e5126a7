use crate::auth::HashError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by the lifecycle components.
///
/// The message of `Validation`, `NotFound` and `Conflict` is meant for the end user and
/// names the rule that was broken.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    PasswordHash(#[from] HashError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Storage(_) | ServiceError::PasswordHash(_) => 500,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::Storage(_) => "store_error",
            ServiceError::PasswordHash(_) => "hash_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::validation("x").status_code(), 400);
        assert_eq!(ServiceError::not_found("x").status_code(), 404);
        assert_eq!(ServiceError::conflict("x").status_code(), 409);
        let storage: ServiceError = StorageError::Unavailable("actor closed".into()).into();
        assert_eq!(storage.status_code(), 500);
        assert_eq!(storage.code(), "store_error");
    }

    #[test]
    fn test_messages_are_passed_through() {
        assert_eq!(
            ServiceError::validation("date cannot be blank").to_string(),
            "date cannot be blank"
        );
        let storage: ServiceError = StorageError::Rejected("invalid price: -1".into()).into();
        assert_eq!(storage.to_string(), "rejected by store: invalid price: -1");
    }
}
