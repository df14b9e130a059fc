use super::error::{SqliteRepositoryError, SqliteResult};
use super::model::CountResult;
use crate::infrastructure::repositories::sqlite::migration::MIGRATIONS;
use chrono::Local;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel::RunQueryDsl;
use diesel_migrations::MigrationHarness;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

pub type ConnectionPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type PooledConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

const POOL_SIZE: u32 = 15;

/// Per-connection pragmas; the HTTP surface writes from several threads at once.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Initialize a connection pool and bring the schema up to date
pub fn init_pool(database_url: &str) -> SqliteResult<ConnectionPool> {
    debug!("Initializing connection pool for: {}", database_url);

    if let Some(parent) = Path::new(database_url).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(SqliteRepositoryError::IoError)?;
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(POOL_SIZE)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout_ms: 5_000,
        }))
        .build(manager)
        .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))?;

    run_pending_migrations(&pool, database_url)?;

    info!("Connection pool initialized successfully");
    Ok(pool)
}

/// A database without bookmark rows (or without the table) needs no backup
fn is_database_empty_for_backup(conn: &mut SqliteConnection) -> bool {
    match diesel::sql_query("SELECT COUNT(*) as count FROM bookmarks").get_result::<CountResult>(conn)
    {
        Ok(result) => {
            debug!("Database contains {} bookmark records", result.count);
            result.count == 0
        }
        Err(e) => {
            debug!("Bookmarks table doesn't exist or query failed: {}", e);
            true
        }
    }
}

/// `<name>_backup_<YYYYMMDD>.<ext>` next to the original file
fn backup_path(db_path: &Path, date_suffix: &str) -> Option<PathBuf> {
    let file_name = db_path.file_name()?.to_string_lossy();
    let backup_name = match file_name.rfind('.') {
        Some(ext_pos) => {
            let (name, ext) = file_name.split_at(ext_pos);
            format!("{}_backup_{}{}", name, date_suffix, ext)
        }
        None => format!("{}_backup_{}", file_name, date_suffix),
    };
    Some(db_path.with_file_name(backup_name))
}

/// Run any pending database migrations, backing up a populated database first
#[instrument(skip(pool), level = "info")]
pub fn run_pending_migrations(pool: &ConnectionPool, database_url: &str) -> SqliteResult<()> {
    let mut conn = pool
        .get()
        .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))?;

    let pending = conn.pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteRepositoryError::MigrationError(format!("Failed to check pending migrations: {}", e))
    })?;

    if pending.is_empty() {
        debug!("No pending migrations to run");
        return Ok(());
    }

    for migration in &pending {
        info!("Pending migration: {}", migration.name());
    }

    let db_path = Path::new(database_url);
    if db_path.exists() && !is_database_empty_for_backup(&mut conn) {
        let date_suffix = Local::now().format("%Y%m%d").to_string();
        let backup = backup_path(db_path, &date_suffix).ok_or_else(|| {
            SqliteRepositoryError::OperationFailed(
                "Could not determine database filename for backup".to_string(),
            )
        })?;

        fs::copy(db_path, &backup).map_err(|e| {
            SqliteRepositoryError::IoError(std::io::Error::other(format!(
                "Failed to create backup: {}",
                e
            )))
        })?;
        info!("Backup created at: {}", backup.display());
    } else {
        debug!("Skipping backup for missing or empty database");
    }

    conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        SqliteRepositoryError::MigrationError(format!("Failed to run migrations: {}", e))
    })?;

    info!("Migrations completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_db_file_with_extension_when_backup_path_then_suffix_before_extension() {
        let path = backup_path(Path::new("/data/linkshelf.db"), "20261019").unwrap();
        assert_eq!(path, PathBuf::from("/data/linkshelf_backup_20261019.db"));
    }

    #[test]
    fn given_db_file_without_extension_when_backup_path_then_suffix_appended() {
        let path = backup_path(Path::new("/data/linkshelf"), "20261019").unwrap();
        assert_eq!(path, PathBuf::from("/data/linkshelf_backup_20261019"));
    }

    #[test]
    fn given_fresh_path_when_init_pool_then_schema_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested/fresh.db");
        let pool = init_pool(db.to_str().unwrap()).unwrap();

        let mut conn = pool.get().unwrap();
        assert!(is_database_empty_for_backup(&mut conn));
        assert!(conn.pending_migrations(MIGRATIONS).unwrap().is_empty());
    }
}
