// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            // auth failures are matched on by callers, leave them alone
            err => err,
        }
    }

    /// Input errors become `Validation`, everything else is passed through as storage failure
    pub fn from_validation(err: DomainError) -> Self {
        if err.is_validation() {
            ApplicationError::Validation(err.to_string())
        } else {
            ApplicationError::Domain(err)
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApplicationError::Unauthenticated | ApplicationError::Forbidden(_)
        )
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
