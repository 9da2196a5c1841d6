//! Error types for casebook services
//!
//! Every service operation returns [`CasebookError`]. The HTTP layer maps
//! [`CasebookError::kind`] onto a status code; nothing here panics or retries.

use casebook_model::ModelError;
use casebook_store::StoreError;

/// Main casebook error type
#[derive(Debug, thiserror::Error)]
pub enum CasebookError {
    /// Addressed record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Required field missing or empty
    #[error("validation failed: {0}")]
    Validation(String),

    /// Record is not in a state that allows the change
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unique field already taken
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Credentials did not match
    #[error("invalid email or password")]
    Unauthorized,

    /// Merged record could not be represented
    #[error("malformed record: {0}")]
    Malformed(#[from] ModelError),

    /// Collection could not be saved
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Coarse classification used at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller sent something unusable
    BadInput,
    /// Authentication failed
    Unauthorized,
    /// Addressed record missing
    NotFound,
    /// State or uniqueness conflict
    Conflict,
    /// Server-side fault
    Internal,
}

impl CasebookError {
    /// Build a validation error
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a not-found error
    #[inline]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Classify for the request boundary
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) | Self::Malformed(_) => ErrorKind::BadInput,
            Self::Conflict(_) | Self::AlreadyExists(_) => ErrorKind::Conflict,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller, not the server, is at fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            CasebookError::not_found("case study c1").to_string(),
            "not found: case study c1"
        );
        assert_eq!(
            CasebookError::Unauthorized.to_string(),
            "invalid email or password"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(CasebookError::validation("x").kind(), ErrorKind::BadInput);
        assert_eq!(
            CasebookError::AlreadyExists("u".into()).kind(),
            ErrorKind::Conflict
        );
        let storage = CasebookError::from(StoreError::Unavailable("down".into()));
        assert_eq!(storage.kind(), ErrorKind::Internal);
        assert!(!storage.is_client_error());
        assert!(CasebookError::Unauthorized.is_client_error());
    }
}
