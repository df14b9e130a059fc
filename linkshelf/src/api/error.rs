// src/api/error.rs
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;

pub const AUTHENTICATE_BEARER_CHALLENGE: &str = r#"Bearer realm="linkshelf""#;
const STORAGE_FAILURE_MESSAGE: &str = "the bookmark store could not complete the request";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Unauthenticated => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "a valid session is required",
            ),
            ApplicationError::Forbidden(msg) => {
                ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg)
            }
            ApplicationError::Validation(msg) => {
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            ApplicationError::Domain(DomainError::BookmarkNotFound(id)) => ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("bookmark not found: {}", id),
            ),
            ApplicationError::Domain(err) if err.is_validation() => {
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
            ApplicationError::Domain(err) => {
                // details stay in the server log
                error!("Storage failure: {}", err);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    STORAGE_FAILURE_MESSAGE,
                )
            }
            ApplicationError::Other(msg) => ApiError::internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::new(rejection.status(), "VALIDATION_ERROR", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        };
        let mut response = (self.status, Json(payload)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTHENTICATE_BEARER_CHALLENGE),
            );
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApplicationError::Unauthenticated, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")]
    #[case(ApplicationError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN")]
    #[case(ApplicationError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR")]
    #[case(
        ApplicationError::Domain(DomainError::BookmarkNotFound("x".into())),
        StatusCode::NOT_FOUND,
        "NOT_FOUND"
    )]
    #[case(
        ApplicationError::Domain(DomainError::RepositoryError("x".into())),
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORAGE_ERROR"
    )]
    fn given_application_error_when_into_api_error_then_distinct_status(
        #[case] err: ApplicationError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let api = ApiError::from(err);
        assert_eq!(api.status(), status);
        assert_eq!(api.code(), code);
    }

    #[test]
    fn given_storage_failure_when_into_api_error_then_detail_not_exposed() {
        let err = ApplicationError::Domain(DomainError::RepositoryError(
            "Database error: no such table: bookmarks".into(),
        ));

        let api = ApiError::from(err);

        assert_eq!(api.code(), "STORAGE_ERROR");
        assert_eq!(api.message, STORAGE_FAILURE_MESSAGE);
        assert!(!api.message.contains("no such table"));
    }

    #[test]
    fn given_unauthenticated_when_into_response_then_bearer_challenge() {
        let response = ApiError::from(ApplicationError::Unauthenticated).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            AUTHENTICATE_BEARER_CHALLENGE
        );
    }
}
