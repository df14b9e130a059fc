// src/application/services/session_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::session::{RequestContext, Session};
use chrono::Duration;
use std::fmt::Debug;

/// Issues and resolves the sessions bookmark calls are authenticated with
pub trait SessionService: Send + Sync + Debug {
    /// Active session for `token`; unknown and expired tokens resolve to `None`
    fn resolve(&self, token: &str) -> ApplicationResult<Option<Session>>;

    /// New session for `user_id`, or for a freshly generated user when `None`
    fn issue(&self, user_id: Option<&str>, ttl: Option<Duration>) -> ApplicationResult<Session>;

    fn revoke(&self, token: &str) -> ApplicationResult<bool>;

    /// Request context for an optional bearer token
    fn context_for(&self, token: Option<&str>) -> ApplicationResult<RequestContext> {
        let session = match token {
            Some(token) => self.resolve(token)?,
            None => None,
        };
        Ok(RequestContext::from_session(session.as_ref()))
    }
}
