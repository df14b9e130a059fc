// src/api/auth.rs
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Bearer token from the `Authorization` header, if any.
///
/// Anything that is not a non-empty bearer credential counts as no session.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
