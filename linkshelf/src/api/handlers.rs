// src/api/handlers.rs
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::auth::bearer_token;
use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{Bookmark, BookmarkRecord, CreateBookmarkInput};
use crate::domain::session::RequestContext;
use crate::infrastructure::di::ServiceContainer;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Runs a storage-bound service call off the async runtime with the caller's context
async fn with_context<T, F>(state: &AppState, headers: &HeaderMap, call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ServiceContainer, &RequestContext) -> ApplicationResult<T> + Send + 'static,
{
    let services = state.services.clone();
    let token = bearer_token(headers);

    tokio::task::spawn_blocking(move || {
        let ctx = services.session_service.context_for(token.as_deref())?;
        call(&services, &ctx)
    })
    .await
    .map_err(|e| ApiError::internal(format!("worker failed: {}", e)))?
    .map_err(ApiError::from)
}

#[instrument(skip_all, name = "bookmark.create")]
pub async fn create_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateBookmarkInput>, JsonRejection>,
) -> ApiResult<Json<Bookmark>> {
    let Json(input) = payload?;
    let bookmark = with_context(&state, &headers, move |services, ctx| {
        services.bookmark_service.create_bookmark(ctx, input)
    })
    .await?;
    Ok(Json(bookmark))
}

#[instrument(skip_all, name = "bookmark.list")]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Bookmark>>> {
    let bookmarks = with_context(&state, &headers, |services, ctx| {
        services.bookmark_service.list_bookmarks(ctx)
    })
    .await?;
    Ok(Json(bookmarks))
}

#[instrument(skip_all, name = "bookmark.update")]
pub async fn update_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BookmarkRecord>, JsonRejection>,
) -> ApiResult<Json<Bookmark>> {
    let Json(input) = payload?;
    let bookmark = with_context(&state, &headers, move |services, ctx| {
        services.bookmark_service.update_bookmark(ctx, input)
    })
    .await?;
    Ok(Json(bookmark))
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let repository = state.services.bookmark_repository.clone();
    let ready = tokio::task::spawn_blocking(move || repository.get_connection().is_ok())
        .await
        .unwrap_or(false);

    if ready {
        (StatusCode::OK, Json(HealthStatus { status: "ok".into() }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unavailable".into(),
            }),
        )
    }
}
