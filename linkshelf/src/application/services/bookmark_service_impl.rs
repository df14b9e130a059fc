// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::bookmark::{Bookmark, BookmarkDraft, BookmarkRecord, CreateBookmarkInput};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::session::RequestContext;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
    reject_anonymous_list: bool,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            reject_anonymous_list: false,
        }
    }

    /// Make `list_bookmarks` fail with `Unauthenticated` like the other procedures
    pub fn with_reject_anonymous_list(mut self, reject: bool) -> Self {
        self.reject_anonymous_list = reject;
        self
    }

    fn require_user<'a>(&self, ctx: &'a RequestContext) -> ApplicationResult<&'a str> {
        ctx.user_id().ok_or(ApplicationError::Unauthenticated)
    }
}

impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self, ctx, input), level = "debug",
               fields(user_id = ctx.user_id().unwrap_or("-"), url = %input.url))]
    fn create_bookmark(
        &self,
        ctx: &RequestContext,
        input: CreateBookmarkInput,
    ) -> ApplicationResult<Bookmark> {
        input.validate().map_err(ApplicationError::from_validation)?;
        let user_id = self.require_user(ctx)?;

        let draft = BookmarkDraft::from_input(user_id, input);
        let bookmark = self.repository.create(&draft)?;
        debug!("Created bookmark {}", bookmark.id);

        Ok(bookmark)
    }

    #[instrument(skip(self, ctx), level = "debug", fields(user_id = ctx.user_id().unwrap_or("-")))]
    fn list_bookmarks(&self, ctx: &RequestContext) -> ApplicationResult<Vec<Bookmark>> {
        let Some(user_id) = ctx.user_id() else {
            if self.reject_anonymous_list {
                return Err(ApplicationError::Unauthenticated);
            }
            debug!("Anonymous list request, returning no bookmarks");
            return Ok(Vec::new());
        };

        Ok(self.repository.find_by_user(user_id)?)
    }

    #[instrument(skip(self, ctx, input), level = "debug",
               fields(user_id = ctx.user_id().unwrap_or("-"), id = %input.id))]
    fn update_bookmark(
        &self,
        ctx: &RequestContext,
        input: BookmarkRecord,
    ) -> ApplicationResult<Bookmark> {
        input.validate().map_err(ApplicationError::from_validation)?;
        let user_id = self.require_user(ctx)?;

        if user_id != input.user_id {
            return Err(ApplicationError::Forbidden(
                "bookmark belongs to another user".to_string(),
            ));
        }

        let changes = input.changes();
        let bookmark = self.repository.update(&input.id, user_id, &changes)?;

        Ok(bookmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::{BookmarkChanges, BookmarkDraft};
    use crate::domain::error::DomainError;
    use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
    use crate::util::testing::setup_test_db;
    use tempfile::TempDir;

    /// Fails the test on any storage access
    #[derive(Debug)]
    struct UntouchableRepository;

    impl BookmarkRepository for UntouchableRepository {
        fn create(&self, _draft: &BookmarkDraft) -> Result<Bookmark, DomainError> {
            panic!("create must not be reached");
        }
        fn find_by_user(&self, _user_id: &str) -> Result<Vec<Bookmark>, DomainError> {
            panic!("find_by_user must not be reached");
        }
        fn get_by_id(&self, _id: &str) -> Result<Option<Bookmark>, DomainError> {
            panic!("get_by_id must not be reached");
        }
        fn update(
            &self,
            _id: &str,
            _user_id: &str,
            _changes: &BookmarkChanges,
        ) -> Result<Bookmark, DomainError> {
            panic!("update must not be reached");
        }
    }

    fn sqlite_service() -> (
        TempDir,
        Arc<SqliteBookmarkRepository>,
        BookmarkServiceImpl<SqliteBookmarkRepository>,
    ) {
        let (dir, repo) = setup_test_db();
        let repo = Arc::new(repo);
        let service = BookmarkServiceImpl::new(repo.clone());
        (dir, repo, service)
    }

    fn untouchable_service() -> BookmarkServiceImpl<UntouchableRepository> {
        BookmarkServiceImpl::new(Arc::new(UntouchableRepository))
    }

    fn record_for(bookmark: &Bookmark) -> BookmarkRecord {
        bookmark.to_record()
    }

    #[test]
    fn given_session_when_create_then_owned_by_session_user() {
        let (_dir, _repo, service) = sqlite_service();
        let ctx = RequestContext::for_user("alice");

        let bookmark = service
            .create_bookmark(&ctx, CreateBookmarkInput::new("Rust", "https://www.rust-lang.org/"))
            .unwrap();

        assert_eq!(bookmark.user_id, "alice");
        assert_eq!(bookmark.title, "Rust");
        assert!(!bookmark.favorite);
    }

    #[test]
    fn given_favorite_flag_when_create_then_persisted() {
        let (_dir, _repo, service) = sqlite_service();
        let ctx = RequestContext::for_user("alice");

        let bookmark = service
            .create_bookmark(
                &ctx,
                CreateBookmarkInput::new("Docs", "https://docs.rs").with_favorite(true),
            )
            .unwrap();

        assert!(bookmark.favorite);
    }

    #[test]
    fn given_no_session_when_create_then_unauthenticated_and_nothing_persisted() {
        let service = untouchable_service();

        let result = service.create_bookmark(
            &RequestContext::anonymous(),
            CreateBookmarkInput::new("Rust", "https://www.rust-lang.org/"),
        );

        assert!(matches!(result, Err(ApplicationError::Unauthenticated)));
    }

    #[test]
    fn given_malformed_url_when_create_then_validation_error() {
        let service = untouchable_service();

        let result = service.create_bookmark(
            &RequestContext::for_user("alice"),
            CreateBookmarkInput::new("Broken", "not-a-url"),
        );

        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[test]
    fn given_no_session_when_list_then_empty_without_touching_storage() {
        let service = untouchable_service();

        let bookmarks = service.list_bookmarks(&RequestContext::anonymous()).unwrap();

        assert!(bookmarks.is_empty());
    }

    #[test]
    fn given_strict_policy_when_list_without_session_then_unauthenticated() {
        let service = untouchable_service().with_reject_anonymous_list(true);

        let result = service.list_bookmarks(&RequestContext::anonymous());

        assert!(matches!(result, Err(ApplicationError::Unauthenticated)));
    }

    #[test]
    fn given_no_session_when_update_then_unauthenticated() {
        let service = untouchable_service();
        let input = BookmarkRecord {
            id: "0b4f9c1e-6d0a-4a53-8f3e-8f6a1a2b3c4d".to_string(),
            user_id: "alice".to_string(),
            title: "T".to_string(),
            url: "https://t.example".to_string(),
            favorite: true,
        };

        let result = service.update_bookmark(&RequestContext::anonymous(), input);

        assert!(matches!(result, Err(ApplicationError::Unauthenticated)));
    }

    #[test]
    fn given_foreign_user_id_when_update_then_forbidden_before_storage() {
        let service = untouchable_service();
        let input = BookmarkRecord {
            id: "0b4f9c1e-6d0a-4a53-8f3e-8f6a1a2b3c4d".to_string(),
            user_id: "bob".to_string(),
            title: "T".to_string(),
            url: "https://t.example".to_string(),
            favorite: true,
        };

        let result = service.update_bookmark(&RequestContext::for_user("alice"), input);

        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    }

    #[test]
    fn given_foreign_user_id_for_real_row_when_update_then_row_unchanged() {
        let (_dir, repo, service) = sqlite_service();
        let bobs = service
            .create_bookmark(
                &RequestContext::for_user("bob"),
                CreateBookmarkInput::new("Bob", "https://bob.example"),
            )
            .unwrap();

        let mut input = record_for(&bobs);
        input.favorite = true;
        let result = service.update_bookmark(&RequestContext::for_user("alice"), input);

        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
        assert_eq!(repo.get_by_id(&bobs.id).unwrap(), Some(bobs));
    }

    #[test]
    fn given_own_bookmark_when_update_then_fields_change_and_identity_stays() {
        let (_dir, _repo, service) = sqlite_service();
        let ctx = RequestContext::for_user("alice");
        let created = service
            .create_bookmark(&ctx, CreateBookmarkInput::new("Old", "https://old.example"))
            .unwrap();

        let mut input = record_for(&created);
        input.title = "New".to_string();
        input.url = "https://new.example/".to_string();
        input.favorite = true;
        let updated = service.update_bookmark(&ctx, input).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, "alice");
        assert_eq!(updated.title, "New");
        assert_eq!(updated.url, "https://new.example/");
        assert!(updated.favorite);
    }

    #[test]
    fn given_unknown_id_when_update_then_store_not_found_propagates() {
        let (_dir, _repo, service) = sqlite_service();
        let input = BookmarkRecord {
            id: "0b4f9c1e-6d0a-4a53-8f3e-8f6a1a2b3c4d".to_string(),
            user_id: "alice".to_string(),
            title: "T".to_string(),
            url: "https://t.example".to_string(),
            favorite: false,
        };

        let result = service.update_bookmark(&RequestContext::for_user("alice"), input);

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::BookmarkNotFound(_)))
        ));
    }

    #[test]
    fn given_invalid_record_when_update_then_validation_error() {
        let service = untouchable_service();
        let input = BookmarkRecord {
            id: "not-a-uuid".to_string(),
            user_id: "alice".to_string(),
            title: "T".to_string(),
            url: "https://t.example".to_string(),
            favorite: false,
        };

        let result = service.update_bookmark(&RequestContext::for_user("alice"), input);

        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }
}
