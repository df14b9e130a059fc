use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

pub const ENV_DB_URL: &str = "LINKSHELF_DB_URL";
pub const ENV_BIND: &str = "LINKSHELF_BIND";
pub const ENV_REJECT_ANONYMOUS_LIST: &str = "LINKSHELF_REJECT_ANONYMOUS_LIST";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerOpts {
    /// Socket address the HTTP surface listens on (default: "127.0.0.1:3000")
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerOpts {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthOpts {
    /// Fail anonymous `bookmark.list` calls instead of answering with an empty list
    #[serde(default)]
    pub reject_anonymous_list: bool,

    /// Lifetime of issued sessions in hours, 0 for sessions that never expire
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
}

fn default_session_ttl_hours() -> u32 {
    24 * 30
}

impl Default for AuthOpts {
    fn default() -> Self {
        Self {
            reject_anonymous_list: false,
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}

impl AuthOpts {
    pub fn session_ttl(&self) -> Option<chrono::Duration> {
        match self.session_ttl_hours {
            0 => None,
            hours => Some(chrono::Duration::hours(i64::from(hours))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    #[serde(default)]
    pub server: ServerOpts,

    #[serde(default)]
    pub auth: AuthOpts,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/linkshelf")
}

fn default_db_path() -> String {
    config_dir()
        .join("linkshelf.db")
        .to_string_lossy()
        .into_owned()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            server: ServerOpts::default(),
            auth: AuthOpts::default(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

fn apply_env_overrides(settings: &mut Settings) -> DomainResult<()> {
    if let Ok(db_url) = std::env::var(ENV_DB_URL) {
        trace!("Using {} from environment: {}", ENV_DB_URL, db_url);
        settings.db_url = db_url;
    }

    if let Ok(bind) = std::env::var(ENV_BIND) {
        trace!("Using {} from environment: {}", ENV_BIND, bind);
        settings.server.bind = bind;
    }

    if let Ok(value) = std::env::var(ENV_REJECT_ANONYMOUS_LIST) {
        settings.auth.reject_anonymous_list = parse_bool(&value).ok_or_else(|| {
            DomainError::Other(format!(
                "{} must be a boolean, got '{}'",
                ENV_REJECT_ANONYMOUS_LIST, value
            ))
        })?;
    }

    Ok(())
}

/// Load settings: defaults, then the config file, then environment variables.
///
/// An explicit `config_path` must exist; the default location is optional.
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_path {
        Some(path) => read_config_file(path)?,
        None => {
            let default_path = config_dir().join("config.toml");
            if default_path.exists() {
                trace!("Loading config from: {:?}", default_path);
                read_config_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings)?;

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    fn clear_env() {
        env::remove_var(ENV_DB_URL);
        env::remove_var(ENV_BIND);
        env::remove_var(ENV_REJECT_ANONYMOUS_LIST);
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert!(settings.db_url.ends_with("linkshelf.db"));
        assert_eq!(settings.server.bind, "127.0.0.1:3000");
        assert!(!settings.auth.reject_anonymous_list);
        assert_eq!(settings.auth.session_ttl(), Some(chrono::Duration::hours(720)));
    }

    #[test]
    #[serial]
    fn test_config_file_loading() {
        let _guard = EnvGuard::new();
        clear_env();

        let (_dir, path) = create_temp_config_file(
            r#"
            db_url = "/config/file/path.db"

            [server]
            bind = "0.0.0.0:8080"

            [auth]
            reject_anonymous_list = true
            session_ttl_hours = 0
            "#,
        );

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.db_url, "/config/file/path.db");
        assert_eq!(settings.server.bind, "0.0.0.0:8080");
        assert!(settings.auth.reject_anonymous_list);
        assert_eq!(settings.auth.session_ttl(), None);
    }

    #[test]
    #[serial]
    fn test_partial_config_file_keeps_defaults() {
        let _guard = EnvGuard::new();
        clear_env();

        let (_dir, path) = create_temp_config_file(r#"db_url = "/only/db.db""#);

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.db_url, "/only/db.db");
        assert_eq!(settings.server, ServerOpts::default());
        assert_eq!(settings.auth, AuthOpts::default());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_config_file() {
        let _guard = EnvGuard::new();
        env::set_var(ENV_DB_URL, "/env/override.db");
        env::set_var(ENV_BIND, "127.0.0.1:9999");
        env::set_var(ENV_REJECT_ANONYMOUS_LIST, "yes");

        let (_dir, path) = create_temp_config_file(
            r#"
            db_url = "/config/non-override.db"
            [server]
            bind = "0.0.0.0:1"
            "#,
        );

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.db_url, "/env/override.db");
        assert_eq!(settings.server.bind, "127.0.0.1:9999");
        assert!(settings.auth.reject_anonymous_list);
    }

    #[test]
    #[serial]
    fn test_invalid_boolean_in_environment() {
        let _guard = EnvGuard::new();
        clear_env();
        env::set_var(ENV_REJECT_ANONYMOUS_LIST, "maybe");

        let (_dir, path) = create_temp_config_file("");

        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_file_is_an_error() {
        let _guard = EnvGuard::new();
        clear_env();

        let result = load_settings(Some(Path::new("/definitely/not/here/config.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn test_generated_config_parses_back() {
        let generated = generate_default_config();
        let parsed: Settings = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
