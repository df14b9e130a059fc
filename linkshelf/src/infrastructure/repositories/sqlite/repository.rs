// src/infrastructure/repositories/sqlite/repository.rs

use diesel::prelude::*;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::bookmark::{Bookmark, BookmarkChanges, BookmarkDraft};
use crate::domain::error::DomainError;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::repositories::sqlite::model::{
    DbBookmark, DbBookmarkChanges, NewBookmark,
};
use crate::infrastructure::repositories::sqlite::schema::bookmarks::dsl;

#[derive(Clone, Debug)]
pub struct SqliteBookmarkRepository {
    pool: ConnectionPool,
}

impl SqliteBookmarkRepository {
    /// Create a new SQLite repository with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite repository with the provided database URL
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Get a connection from the pool
    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    /// Number of bookmark rows across all users
    pub fn count(&self) -> SqliteResult<i64> {
        let mut conn = self.get_connection()?;
        dsl::bookmarks
            .count()
            .get_result(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)
    }
}

impl BookmarkRepository for SqliteBookmarkRepository {
    #[instrument(skip_all, level = "debug", fields(user_id = %draft.user_id))]
    fn create(&self, draft: &BookmarkDraft) -> Result<Bookmark, DomainError> {
        let mut conn = self.get_connection()?;

        let row = NewBookmark::from_draft(Uuid::new_v4().to_string(), draft);
        debug!("Inserting bookmark: {:?}", row);

        let inserted = diesel::insert_into(dsl::bookmarks)
            .values(&row)
            .returning(DbBookmark::as_returning())
            .get_result::<DbBookmark>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(inserted.into())
    }

    #[instrument(skip(self), level = "debug")]
    fn find_by_user(&self, user_id: &str) -> Result<Vec<Bookmark>, DomainError> {
        let mut conn = self.get_connection()?;

        let rows = dsl::bookmarks
            .filter(dsl::user_id.eq(user_id))
            .select(DbBookmark::as_select())
            .load::<DbBookmark>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, DomainError> {
        let mut conn = self.get_connection()?;

        let row = dsl::bookmarks
            .filter(dsl::id.eq(id))
            .select(DbBookmark::as_select())
            .first::<DbBookmark>(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(row.map(Bookmark::from))
    }

    #[instrument(skip(self, changes), level = "debug")]
    fn update(
        &self,
        id: &str,
        user_id: &str,
        changes: &BookmarkChanges,
    ) -> Result<Bookmark, DomainError> {
        let mut conn = self.get_connection()?;

        let updated = diesel::update(
            dsl::bookmarks
                .filter(dsl::id.eq(id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .set(DbBookmarkChanges::from(changes))
        .returning(DbBookmark::as_returning())
        .get_result::<DbBookmark>(&mut conn)
        .optional()
        .map_err(SqliteRepositoryError::DatabaseError)?;

        match updated {
            Some(row) => Ok(row.into()),
            None => Err(SqliteRepositoryError::BookmarkNotFound(id.to_string()).into()),
        }
    }
}
