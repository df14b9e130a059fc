// src/infrastructure/repositories/sqlite/session_repository.rs

use diesel::prelude::*;
use tracing::instrument;

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use super::model::DbSession;
use super::schema::sessions::dsl;
use crate::domain::error::DomainError;
use crate::domain::repositories::session_repository::SessionRepository;
use crate::domain::session::Session;

/// Sessions live in the same database file as the bookmarks
#[derive(Clone, Debug)]
pub struct SqliteSessionRepository {
    pool: ConnectionPool,
}

impl SqliteSessionRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }
}

impl SessionRepository for SqliteSessionRepository {
    #[instrument(skip_all, level = "debug", fields(user_id = %session.user_id))]
    fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let mut conn = self.get_connection()?;

        diesel::insert_into(dsl::sessions)
            .values(DbSession::from(session))
            .execute(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(())
    }

    #[instrument(skip_all, level = "debug")]
    fn get_by_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let mut conn = self.get_connection()?;

        let row = dsl::sessions
            .filter(dsl::token.eq(token))
            .select(DbSession::as_select())
            .first::<DbSession>(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(row.map(Session::from))
    }

    #[instrument(skip_all, level = "debug")]
    fn delete(&self, token: &str) -> Result<bool, DomainError> {
        let mut conn = self.get_connection()?;

        let deleted = diesel::delete(dsl::sessions.filter(dsl::token.eq(token)))
            .execute(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(deleted > 0)
    }
}
