//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/music-catalog/config.toml`).
//! Every section has defaults, so a missing or partial file still yields a
//! usable config. A handful of environment variables override file values
//! after loading (see [`AppConfig::apply_env_overrides`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("music-catalog")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub mail: MailConfig,
    pub uploads: UploadsConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS; also the base of password reset links
    pub frontend_url: String,
    /// Mark the auth cookie `Secure` (enable behind HTTPS)
    pub secure_cookies: bool,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            frontend_url: "http://localhost:3000".to_string(),
            secure_cookies: false,
            shutdown_timeout: 30,
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
            url: "sqlite://./music-catalog.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    /// Session token lifetime; also the auth cookie's max age
    pub jwt_expiration_hours: i64,
    /// Password reset token lifetime
    pub reset_token_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 30 * 24,
            reset_token_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP relay host. When empty, reset links are only logged.
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: 587,
            username: None,
            password: None,
            from_address: "support@music-catalog.local".to_string(),
        }
    }
}

impl MailConfig {
    pub fn is_configured(&self) -> bool {
        !self.smtp_host.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: PathBuf,
    /// Per-file cap in bytes
    pub max_file_size: usize,
    /// Scheme + host used to build public file links
    pub public_base_url: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_file_size: 10 * 1024 * 1024,
            public_base_url: "http://localhost:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Account seeded on first start when the users table is empty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@music-catalog.local".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file, then apply environment overrides.
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&raw)?
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Override file values with environment variables.
    ///
    /// The lookup is injected so tests don't have to mutate the process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(origin) = lookup("FRONTEND_URL") {
            self.server.frontend_url = origin;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(host) = lookup("SMTP_HOST") {
            self.mail.smtp_host = host;
        }
        if let Some(user) = lookup("EMAIL_USER") {
            self.mail.username = Some(user);
        }
        if let Some(pass) = lookup("EMAIL_PASS") {
            self.mail.password = Some(pass);
        }
        if let Some(base) = lookup("BASE_URL") {
            self.uploads.public_base_url = base;
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
