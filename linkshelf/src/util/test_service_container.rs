// src/util/test_service_container.rs
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::util::testing::{init_test_env, EnvGuard};
use tempfile::TempDir;

/// Production `ServiceContainer` wired against a throwaway database
pub struct TestServiceContainer {
    pub _env_guard: EnvGuard,
    pub _db_dir: TempDir,
    pub settings: Settings,
    pub services: ServiceContainer,
}

impl TestServiceContainer {
    pub fn new() -> Self {
        Self::with_settings(|_| {})
    }

    /// Build with adjusted settings; `db_url` always points into a temp dir.
    pub fn with_settings<F: FnOnce(&mut Settings)>(adjust: F) -> Self {
        init_test_env();
        let env_guard = EnvGuard::new();
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::default();
        adjust(&mut settings);
        settings.db_url = db_dir
            .path()
            .join("linkshelf-test.db")
            .to_string_lossy()
            .into_owned();

        ServiceContainer::create_db(&settings.db_url).expect("Failed to create test database");
        let services =
            ServiceContainer::new(&settings).expect("Failed to create test service container");

        Self {
            _env_guard: env_guard,
            _db_dir: db_dir,
            settings,
            services,
        }
    }
}

impl Default for TestServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
