// src/domain/session.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated user a session speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
}

/// Server-side proof of a signed-in user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    pub fn is_active(&self) -> bool {
        !self.is_expired_at(Utc::now())
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.user_id.clone(),
        }
    }
}

// the token is a bearer credential and stays out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Per-call context handed to every bookmark operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user: Option<SessionUser>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn for_user<S: Into<String>>(user_id: S) -> Self {
        Self {
            user: Some(SessionUser { id: user_id.into() }),
        }
    }

    pub fn from_session(session: Option<&Session>) -> Self {
        Self {
            user: session.map(Session::user),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            token: "secret-token".to_string(),
            user_id: "u-1".to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn given_session_without_expiry_when_is_active_then_true() {
        assert!(session(None).is_active());
    }

    #[test]
    fn given_session_past_expiry_when_is_active_then_false() {
        assert!(!session(Some(Utc::now() - Duration::minutes(1))).is_active());
    }

    #[test]
    fn given_session_when_debug_then_token_is_redacted() {
        let out = format!("{:?}", session(None));
        assert!(!out.contains("secret-token"));
        assert!(out.contains("u-1"));
    }

    #[test]
    fn given_optional_session_when_from_session_then_context_reflects_user() {
        let s = session(None);
        assert_eq!(RequestContext::from_session(Some(&s)).user_id(), Some("u-1"));
        assert!(!RequestContext::from_session(None).is_authenticated());
        assert_eq!(RequestContext::anonymous(), RequestContext::default());
    }
}
