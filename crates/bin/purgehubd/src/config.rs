//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `purgehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::fmt;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Operator account and session settings.
    pub auth: AuthConfig,
    /// Dashboard bundle location.
    pub dashboard: DashboardConfig,
    /// EdgeOne API client settings.
    pub edgeone: EdgeOneConfig,
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

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Bootstrap operator account and session lifetime.
#[derive(Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Username of the account created on first start.
    pub admin_username: String,
    /// Its initial password. Ignored once the account exists.
    pub admin_password: String,
    /// Seconds a login stays valid.
    pub session_ttl_secs: u64,
}

/// Where the compiled dashboard lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding `index.html` and the wasm bundle.
    pub assets_dir: String,
}

/// EdgeOne API client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EdgeOneConfig {
    /// API endpoint; both regions share it.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from `purgehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("purgehub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PURGEHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("PURGEHUB_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some((host, port)) = var("PURGEHUB_BIND")
            .as_deref()
            .and_then(|val| val.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("PURGEHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("PURGEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("ADMIN_PASSWORD") {
            self.auth.admin_password = val;
        }
        if let Some(val) = var("PURGEHUB_ASSETS_DIR") {
            self.dashboard.assets_dir = val;
        }
        if let Some(val) = var("PURGEHUB_EDGEONE_ENDPOINT") {
            self.edgeone.endpoint = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.admin_username.trim().is_empty() {
            return Err(ConfigError::Validation(
                "admin username must not be empty".to_string(),
            ));
        }
        if self.auth.admin_password.is_empty() {
            return Err(ConfigError::Validation(
                "admin password must not be empty".to_string(),
            ));
        }
        if self.auth.session_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "session ttl must be non-zero".to_string(),
            ));
        }
        if self.edgeone.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "edgeone timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
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

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/purgehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "purgehubd=info,purgehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            session_ttl_secs: 12 * 60 * 60,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish_non_exhaustive()
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            assets_dir: "dist".to_string(),
        }
    }
}

impl Default for EdgeOneConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://teo.tencentcloudapi.com".to_string(),
            timeout_secs: 10,
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
