// src/domain/bookmark.rs
use crate::domain::error::{DomainError, DomainResult};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Represents a persisted bookmark owned by exactly one user
#[derive(Builder, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    #[builder(default = "false")]
    pub favorite: bool,
}

impl Bookmark {
    /// Full record view of this bookmark, the shape `update` expects on the wire
    pub fn to_record(&self) -> BookmarkRecord {
        BookmarkRecord {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            favorite: self.favorite,
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} <{}>{}",
            self.id,
            self.title,
            self.url,
            if self.favorite { " *" } else { "" }
        )
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("favorite", &self.favorite)
            .finish()
    }
}

/// Payload of `bookmark.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmarkInput {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub favorite: bool,
}

impl CreateBookmarkInput {
    pub fn new<S: Into<String>>(title: S, url: S) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            favorite: false,
        }
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)?;
        validate_url(&self.url)
    }
}

/// Payload of `bookmark.update`: the complete bookmark including identity fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub favorite: bool,
}

impl BookmarkRecord {
    pub fn validate(&self) -> DomainResult<()> {
        validate_bookmark_id(&self.id)?;
        validate_user_id(&self.user_id)?;
        validate_title(&self.title)?;
        validate_url(&self.url)
    }

    /// Drops `id` and `user_id`; whatever a client sent for them never reaches a write.
    pub fn changes(&self) -> BookmarkChanges {
        BookmarkChanges {
            title: self.title.clone(),
            url: self.url.clone(),
            favorite: self.favorite,
        }
    }
}

/// The fields an update is allowed to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkChanges {
    pub title: String,
    pub url: String,
    pub favorite: bool,
}

impl BookmarkChanges {
    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)?;
        validate_url(&self.url)
    }
}

/// Row data handed to the store on create; the store adds the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub favorite: bool,
}

impl BookmarkDraft {
    pub fn from_input(user_id: &str, input: CreateBookmarkInput) -> Self {
        Self {
            user_id: user_id.to_string(),
            title: input.title,
            url: input.url,
            favorite: input.favorite,
        }
    }
}

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> DomainResult<()> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| DomainError::InvalidUrl(format!("'{}': {}", url, e)))
}

pub fn validate_bookmark_id(id: &str) -> DomainResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| DomainError::InvalidIdentifier(format!("bookmark id '{}'", id)))
}

pub fn validate_user_id(user_id: &str) -> DomainResult<()> {
    if user_id.trim().is_empty() {
        return Err(DomainError::InvalidIdentifier(
            "user id must not be empty".to_string(),
        ));
    }
    Ok(())
}
