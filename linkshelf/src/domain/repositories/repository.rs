// src/domain/repositories/repository.rs

use crate::domain::bookmark::{Bookmark, BookmarkChanges, BookmarkDraft};
use crate::domain::error::DomainError;

/// Repository trait for bookmark persistence operations
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Insert a new bookmark; the store assigns the id
    fn create(&self, draft: &BookmarkDraft) -> Result<Bookmark, DomainError>;

    /// All bookmarks owned by `user_id`, in no particular order
    fn find_by_user(&self, user_id: &str) -> Result<Vec<Bookmark>, DomainError>;

    /// Get a bookmark by its ID
    fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, DomainError>;

    /// Overwrite the mutable fields of the row `id` owned by `user_id`.
    ///
    /// Fails with `DomainError::BookmarkNotFound` when no such row exists;
    /// a row owned by someone else is reported the same way and left untouched.
    fn update(
        &self,
        id: &str,
        user_id: &str,
        changes: &BookmarkChanges,
    ) -> Result<Bookmark, DomainError>;
}
