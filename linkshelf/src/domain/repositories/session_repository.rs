// src/domain/repositories/session_repository.rs

use crate::domain::error::DomainError;
use crate::domain::session::Session;

/// Storage for sessions issued to users
pub trait SessionRepository: std::fmt::Debug + Send + Sync {
    fn insert(&self, session: &Session) -> Result<(), DomainError>;

    fn get_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;

    /// Returns true when a session was removed
    fn delete(&self, token: &str) -> Result<bool, DomainError>;
}
