//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hbnb.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which storage backend to run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// A single JSON document on disk.
    #[default]
    File,
    /// A `SQLite` database.
    Db,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "db" => Ok(Self::Db),
            other => Err(ConfigError::Validation(format!(
                "unknown storage kind {other:?}, expected \"file\" or \"db\""
            ))),
        }
    }
}

/// Storage configuration. Only the settings of the selected kind are used.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Selected backend.
    pub kind: StorageKind,
    /// JSON document path for the file backend.
    pub file_path: PathBuf,
    /// `SQLite` connection URL for the database backend.
    pub database_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hbnb.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hbnb.toml")?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("HBNB_API_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("HBNB_API_PORT") {
            self.server.port = val
                .parse()
                .map_err(|_| ConfigError::Validation(format!("invalid port {val:?}")))?;
        }
        if let Some(val) = var("HBNB_TYPE_STORAGE") {
            self.storage.kind = val.parse()?;
        }
        if let Some(val) = var("HBNB_FILE_PATH") {
            self.storage.file_path = PathBuf::from(val);
        }
        if let Some(val) = var("HBNB_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = var("HBNB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        match self.storage.kind {
            StorageKind::File if self.storage.file_path.as_os_str().is_empty() => Err(
                ConfigError::Validation("storage file path must not be empty".to_string()),
            ),
            StorageKind::Db if self.storage.database_url.is_empty() => Err(
                ConfigError::Validation("database url must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::File,
            file_path: PathBuf::from("file.json"),
            database_url: "sqlite:hbnb.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hbnbd=info,hbnb=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
