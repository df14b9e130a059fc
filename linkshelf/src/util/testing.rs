// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_BIND, ENV_DB_URL, ENV_REJECT_ANONYMOUS_LIST};
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;

pub const ENV_SESSION: &str = "LINKSHELF_SESSION";

const GUARDED_VARS: [&str; 4] = [ENV_DB_URL, ENV_BIND, ENV_REJECT_ANONYMOUS_LIST, ENV_SESSION];

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes test logging exactly once
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["hyper", "hyper_util", "mio", "tower_http", "r2d2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the crate's environment variables on drop
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: GUARDED_VARS
                .iter()
                .map(|name| (*name, env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}

/// Fresh migrated database in its own temp dir; keep the `TempDir` alive while the repository is used.
pub fn setup_test_db() -> (TempDir, SqliteBookmarkRepository) {
    init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("linkshelf-test.db");
    let repository = SqliteBookmarkRepository::from_url(db_path.to_string_lossy().as_ref())
        .expect("Failed to create SqliteBookmarkRepository");
    (dir, repository)
}
