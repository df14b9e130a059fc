// src/infrastructure/repositories/sqlite/model.rs
use crate::domain::bookmark::{Bookmark, BookmarkChanges, BookmarkDraft};
use crate::domain::session::Session;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::sql_types::Integer;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, QueryableByName, Selectable};
use std::fmt;

#[derive(Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbBookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub favorite: bool,
}

impl fmt::Display for DbBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, user_id: {}, title: {}, url: {}, favorite: {}",
            self.id, self.user_id, self.title, self.url, self.favorite
        )
    }
}

impl fmt::Debug for DbBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<DbBookmark> for Bookmark {
    fn from(db: DbBookmark) -> Self {
        Bookmark {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            url: db.url,
            favorite: db.favorite,
        }
    }
}

/// New bookmark for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
pub struct NewBookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub favorite: bool,
}

impl NewBookmark {
    pub fn from_draft(id: String, draft: &BookmarkDraft) -> Self {
        Self {
            id,
            user_id: draft.user_id.clone(),
            title: draft.title.clone(),
            url: draft.url.clone(),
            favorite: draft.favorite,
        }
    }
}

/// Changes for updating a bookmark; identity columns are deliberately absent
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
pub struct DbBookmarkChanges {
    pub title: String,
    pub url: String,
    pub favorite: bool,
}

impl From<&BookmarkChanges> for DbBookmarkChanges {
    fn from(changes: &BookmarkChanges) -> Self {
        Self {
            title: changes.title.clone(),
            url: changes.url.clone(),
            favorite: changes.favorite,
        }
    }
}

#[derive(Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbSession {
    pub token: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

impl fmt::Debug for DbSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSession")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl From<&Session> for DbSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            user_id: session.user_id.clone(),
            created_at: session.created_at.naive_utc(),
            expires_at: session.expires_at.map(|ts| ts.naive_utc()),
        }
    }
}

impl From<DbSession> for Session {
    fn from(db: DbSession) -> Self {
        Session {
            token: db.token,
            user_id: db.user_id,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(db.created_at, Utc),
            expires_at: db
                .expires_at
                .map(|ts| DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)),
        }
    }
}

#[derive(QueryableByName, Debug)]
pub struct CountResult {
    #[diesel(sql_type = Integer)]
    pub count: i32,
}
