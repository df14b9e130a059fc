// src/domain/error.rs
use crate::domain::bookmark::BookmarkBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Bookmark operation failed: {0}")]
    BookmarkOperationFailed(String),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::BookmarkOperationFailed(msg) => {
                DomainError::BookmarkOperationFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            // validation and lookup failures keep their variant so callers can still match on them
            err => err,
        }
    }

    /// True for failures caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidUrl(_)
                | DomainError::InvalidTitle(_)
                | DomainError::InvalidIdentifier(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<BookmarkBuilderError> for DomainError {
    fn from(e: BookmarkBuilderError) -> Self {
        DomainError::BookmarkOperationFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_operation_error_when_context_then_prefixes_message() {
        let err = DomainError::BookmarkOperationFailed("disk full".to_string()).context("create");
        assert_eq!(err.to_string(), "Bookmark operation failed: create: disk full");
    }

    #[test]
    fn given_validation_error_when_context_then_keeps_variant() {
        let err = DomainError::InvalidUrl("nope".to_string()).context("create");
        assert!(matches!(err, DomainError::InvalidUrl(_)));
        assert!(err.is_validation());
    }

    #[test]
    fn given_not_found_when_is_validation_then_false() {
        assert!(!DomainError::BookmarkNotFound("x".to_string()).is_validation());
    }
}
