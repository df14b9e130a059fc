use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::session_service::SessionService;
use crate::application::{BookmarkServiceImpl, SessionServiceImpl};
use crate::config::Settings;
use crate::infrastructure::repositories::sqlite::migration;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
use crate::infrastructure::repositories::sqlite::session_repository::SqliteSessionRepository;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Production service container - single source of truth for service creation
#[derive(Clone)]
pub struct ServiceContainer {
    pub bookmark_repository: Arc<SqliteBookmarkRepository>,
    pub session_repository: Arc<SqliteSessionRepository>,
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub session_service: Arc<dyn SessionService>,
}

impl ServiceContainer {
    /// Create all services against the existing database at `config.db_url`
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        if !Path::new(&config.db_url).exists() {
            return Err(ApplicationError::Other(format!(
                "Database not found at '{}'. Create one with 'linkshelf create-db {}' or point LINKSHELF_DB_URL at an existing database",
                config.db_url, config.db_url
            )));
        }

        let bookmark_repository = Self::create_repository(&config.db_url)?;
        let session_repository = Arc::new(SqliteSessionRepository::new(
            bookmark_repository.pool().clone(),
        ));

        let bookmark_service = Arc::new(
            BookmarkServiceImpl::new(bookmark_repository.clone())
                .with_reject_anonymous_list(config.auth.reject_anonymous_list),
        );
        let session_service = Arc::new(SessionServiceImpl::new(
            session_repository.clone(),
            config.auth.session_ttl(),
        ));

        Ok(Self {
            bookmark_repository,
            session_repository,
            bookmark_service,
            session_service,
        })
    }

    /// Create an empty database with the current schema; refuses to touch an existing file
    #[instrument(level = "info")]
    pub fn create_db(path: &str) -> ApplicationResult<()> {
        if Path::new(path).exists() {
            return Err(ApplicationError::Validation(format!(
                "Database already exists at: {}. Please choose a different path or delete the existing file.",
                path
            )));
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let repository = SqliteBookmarkRepository::from_url(path).map_err(|e| {
            ApplicationError::Other(format!("Failed to create database: {}", e))
        })?;
        let mut conn = repository
            .get_connection()
            .map_err(|e| ApplicationError::Other(e.to_string()))?;
        migration::init_db(&mut conn).map_err(|e| ApplicationError::Other(e.to_string()))?;

        info!("Database created at {}", path);
        Ok(())
    }

    fn create_repository(db_url: &str) -> ApplicationResult<Arc<SqliteBookmarkRepository>> {
        // runs pending migrations
        let repository = SqliteBookmarkRepository::from_url(db_url).map_err(|e| {
            ApplicationError::Other(format!(
                "Failed to create SQLite bookmark repository: {}",
                e
            ))
        })?;

        Ok(Arc::new(repository))
    }
}
