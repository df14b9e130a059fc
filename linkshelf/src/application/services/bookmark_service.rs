// src/application/services/bookmark_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::{Bookmark, BookmarkRecord, CreateBookmarkInput};
use crate::domain::session::RequestContext;
use std::fmt::Debug;

/// The three bookmark procedures, each scoped to the caller in `ctx`
pub trait BookmarkService: Send + Sync + Debug {
    /// Persist a new bookmark owned by the session user.
    ///
    /// Fails with `Validation` for a blank title or malformed URL and with
    /// `Unauthenticated` without a session user. Not idempotent.
    fn create_bookmark(
        &self,
        ctx: &RequestContext,
        input: CreateBookmarkInput,
    ) -> ApplicationResult<Bookmark>;

    /// Every bookmark owned by the session user, unordered.
    ///
    /// Anonymous callers get an empty list unless the service rejects anonymous listing.
    fn list_bookmarks(&self, ctx: &RequestContext) -> ApplicationResult<Vec<Bookmark>>;

    /// Overwrite title, url and favorite of the caller's bookmark `input.id`.
    ///
    /// `Forbidden` when `input.user_id` is not the session user; checked before storage is touched.
    fn update_bookmark(
        &self,
        ctx: &RequestContext,
        input: BookmarkRecord,
    ) -> ApplicationResult<Bookmark>;
}
