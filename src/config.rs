//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/tour-booking/config.toml`).
//! Every section and field has a default, so an empty or partial file is
//! valid and a missing file yields [`AppConfig::default`].
//!
//! ```toml
//! [server]
//! api_port = 8080
//!
//! [database]
//! url = "sqlite:///var/lib/tour-booking/booking.db?mode=rwc"
//!
//! [inquiries]
//! expiry_days = 7
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;
use crate::notifications::NotifierSettings;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "BOOKING_CONFIG";

/// Upper bound for `inquiries.expiry_days` (ten years).
pub const MAX_EXPIRY_DAYS: i64 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub notifications: NotificationsSection,
    pub inquiries: InquiriesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for background work after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
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
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsSection {
    /// Base URL for links in notifications and emails
    pub public_url: String,
    pub email_enabled: bool,
    pub from_address: String,
}

impl Default for NotificationsSection {
    fn default() -> Self {
        let settings = NotifierSettings::default();
        Self {
            public_url: settings.public_url,
            email_enabled: settings.email_enabled,
            from_address: settings.from_address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InquiriesSection {
    /// Pending responses older than this become EXPIRED
    pub expiry_days: i64,
    pub expiry_check_interval_secs: u64,
}

impl Default for InquiriesSection {
    fn default() -> Self {
        Self {
            expiry_days: 14,
            expiry_check_interval_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Read and validate `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if !(1..=MAX_EXPIRY_DAYS).contains(&self.inquiries.expiry_days) {
            return Err(ConfigError::Invalid(format!(
                "inquiries.expiry_days must be between 1 and {}",
                MAX_EXPIRY_DAYS
            )));
        }
        if self.inquiries.expiry_check_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "inquiries.expiry_check_interval_secs must be positive".into(),
            ));
        }
        if self.notifications.email_enabled && !self.notifications.from_address.contains('@') {
            return Err(ConfigError::Invalid(format!(
                "notifications.from_address '{}' is not an email address",
                self.notifications.from_address
            )));
        }
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn notifier_settings(&self) -> NotifierSettings {
        NotifierSettings {
            public_url: self.notifications.public_url.trim_end_matches('/').to_string(),
            email_enabled: self.notifications.email_enabled,
            from_address: self.notifications.from_address.clone(),
        }
    }
}

/// `$BOOKING_CONFIG`, else `~/.config/tour-booking/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tour-booking")
        .join("config.toml")
}
