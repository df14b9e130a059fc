// src/application/services/session_service_impl.rs
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::session_service::SessionService;
use crate::domain::bookmark::validate_user_id;
use crate::domain::repositories::session_repository::SessionRepository;
use crate::domain::session::Session;

#[derive(Debug)]
pub struct SessionServiceImpl<R: SessionRepository> {
    repository: Arc<R>,
    default_ttl: Option<Duration>,
}

impl<R: SessionRepository> SessionServiceImpl<R> {
    /// `default_ttl` of `None` issues sessions that never expire
    pub fn new(repository: Arc<R>, default_ttl: Option<Duration>) -> Self {
        Self {
            repository,
            default_ttl,
        }
    }
}

impl<R: SessionRepository> SessionService for SessionServiceImpl<R> {
    #[instrument(skip_all, level = "debug")]
    fn resolve(&self, token: &str) -> ApplicationResult<Option<Session>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        match self.repository.get_by_token(token)? {
            Some(session) if session.is_active() => Ok(Some(session)),
            Some(session) => {
                debug!(user_id = %session.user_id, "Session expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), level = "debug")]
    fn issue(&self, user_id: Option<&str>, ttl: Option<Duration>) -> ApplicationResult<Session> {
        let user_id = match user_id {
            Some(id) => {
                validate_user_id(id).map_err(ApplicationError::from_validation)?;
                id.trim().to_string()
            }
            None => Uuid::new_v4().to_string(),
        };

        let ttl = ttl.or(self.default_ttl);
        if ttl.is_some_and(|ttl| ttl <= Duration::zero()) {
            return Err(ApplicationError::Validation(
                "session lifetime must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let expires_at = match ttl {
            Some(ttl) => Some(now.checked_add_signed(ttl).ok_or_else(|| {
                ApplicationError::Validation("session lifetime too large".to_string())
            })?),
            None => None,
        };
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: now,
            expires_at,
        };
        self.repository.insert(&session)?;
        info!(user_id = %session.user_id, "Issued session");

        Ok(session)
    }

    #[instrument(skip_all, level = "debug")]
    fn revoke(&self, token: &str) -> ApplicationResult<bool> {
        Ok(self.repository.delete(token)?)
    }
}
