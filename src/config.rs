//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/cabin-booking/config.toml`).
//! Every section is optional and falls back to its defaults; a missing file
//! yields the default configuration.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [security]
//! api_key = "change-me"
//!
//! [booking]
//! group_threshold = 6
//! utc_offset_minutes = 180
//!
//! [[cabins]]
//! name = "Birch"
//! capacity = 2
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::application::allocation::DEFAULT_GROUP_THRESHOLD;
use crate::application::BookingSettings;
use crate::infrastructure::database::{DatabaseConfig, DEFAULT_DATABASE_URL};
use crate::shared::time::offset_from_minutes;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "CABIN_BOOKING_CONFIG";
/// Environment variable overriding `security.api_key`.
pub const API_KEY_ENV: &str = "API_KEY";
/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config file location: `$CABIN_BOOKING_CONFIG`, else
/// `<config dir>/cabin-booking/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("cabin-booking").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub booking: BookingConfig,
    /// Catalog inserted at startup when the cabins table is empty
    pub cabins: Vec<CabinSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
    /// Per-request deadline; the handler is dropped when it expires
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        Self {
            url: section.url.clone(),
            max_connections: section.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `cabin_booking=debug,sea_orm=warn`
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared bearer key for `/api/*`; unset leaves the API open
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub group_threshold: i32,
    /// Offset used for calendar months, days and plain dates
    pub utc_offset_minutes: i32,
    pub reject_overlapping_writes: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            group_threshold: DEFAULT_GROUP_THRESHOLD,
            utc_offset_minutes: 0,
            reject_overlapping_writes: true,
        }
    }
}

impl BookingConfig {
    pub fn to_settings(&self) -> Result<BookingSettings, ConfigError> {
        let utc_offset = offset_from_minutes(self.utc_offset_minutes).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "booking.utc_offset_minutes {} is out of range",
                self.utc_offset_minutes
            ))
        })?;
        Ok(BookingSettings {
            group_threshold: self.group_threshold,
            utc_offset,
            reject_overlapping_writes: self.reject_overlapping_writes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinSeed {
    pub name: String,
    pub capacity: i32,
}

impl AppConfig {
    /// Load, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without touching the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `API_KEY` and `DATABASE_URL` overrides from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.security.api_key = Some(key);
        }
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.server.port == 0 {
            return invalid("server.port must not be 0".into());
        }
        if self.server.request_timeout_secs == 0 {
            return invalid("server.request_timeout_secs must be > 0".into());
        }
        if self.database.url.trim().is_empty() {
            return invalid("database.url must not be empty".into());
        }
        if self.database.max_connections == 0 {
            return invalid("database.max_connections must be > 0".into());
        }
        if self.booking.group_threshold < 1 {
            return invalid("booking.group_threshold must be at least 1".into());
        }
        self.booking.to_settings()?;

        let mut names = HashSet::new();
        for seed in &self.cabins {
            if seed.name.trim().is_empty() {
                return invalid("cabin names must not be empty".into());
            }
            if seed.capacity < 1 {
                return invalid(format!("cabin '{}' needs a capacity of at least 1", seed.name));
            }
            if !names.insert(seed.name.trim()) {
                return invalid(format!("cabin '{}' is listed more than once", seed.name));
            }
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.booking.group_threshold, 6);
        assert!(cfg.booking.reject_overlapping_writes);
        assert!(cfg.security.api_key.is_none());
        assert!(cfg.cabins.is_empty());
    }

    #[test]
    fn parses_sections_and_catalog() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [server]
            port = 8081

            [security]
            api_key = "k"

            [booking]
            group_threshold = 5
            utc_offset_minutes = -300

            [[cabins]]
            name = "Birch"
            capacity = 2

            [[cabins]]
            name = "Cedar"
            capacity = 4
            "#,
        )
        .unwrap();

        assert_eq!(cfg.address(), "0.0.0.0:8081");
        assert_eq!(cfg.security.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.cabins.len(), 2);
        assert_eq!(cfg.cabins[1], CabinSeed { name: "Cedar".into(), capacity: 4 });

        let settings = cfg.booking.to_settings().unwrap();
        assert_eq!(settings.group_threshold, 5);
        assert_eq!(settings.utc_offset.local_minus_utc(), -300 * 60);
    }

    #[test]
    fn rejects_bad_values() {
        for doc in [
            "[server]\nport = 0",
            "[booking]\nutc_offset_minutes = 1440",
            "[booking]\ngroup_threshold = 0",
            "[[cabins]]\nname = \"\"\ncapacity = 2",
            "[[cabins]]\nname = \"A\"\ncapacity = 0",
            "[[cabins]]\nname = \"A\"\ncapacity = 2\n[[cabins]]\nname = \"A\"\ncapacity = 3",
        ] {
            assert!(
                matches!(AppConfig::from_toml_str(doc), Err(ConfigError::Invalid(_))),
                "{doc}"
            );
        }
        assert!(matches!(
            AppConfig::from_toml_str("[server]\nport = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.security.api_key = Some("from-file".into());
        cfg.apply_env(|key| match key {
            API_KEY_ENV => Some("from-env".into()),
            DATABASE_URL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.security.api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn broken_file_fails_instead_of_defaulting() {
        let path = std::env::temp_dir().join(format!("cabin-booking-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[security]\napi_key = \"s3cret\"\n\n[booking]\nutc_offset_minutes = 2000\n",
        )
        .unwrap();

        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Invalid(ref m)) if m.contains("utc_offset_minutes")));

        let path = std::env::temp_dir().join(format!("cabin-booking-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[security\napi_key = 1").unwrap();
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("cabin-booking-missing-config.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.port, 3000);
    }
}
