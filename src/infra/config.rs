//! Centralized configuration (defaults, optional file, environment).
//!
//! Sources are layered in this order, later ones winning:
//! built-in defaults, `config/menuiq.{toml,yaml,json}`, `MENUIQ__SECTION__KEY`
//! environment variables, and finally `DATABASE_URL`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "MENUIQ";
const CONFIG_FILE: &str = "config/menuiq";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub upload: UploadSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Error responses carry internal detail when set.
    pub development: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub ingest_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::NotFound("database.url (or DATABASE_URL)".to_string()))
    }

    pub fn ingest_timeout(&self) -> Duration {
        Duration::from_secs(self.ingest_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Loads `.env`, then every configuration layer, and validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let builder = Self::defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only, unvalidated. Callers adjust fields and call `validate`.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.development", false)?
            .set_default("storage.backend", "postgres")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 10)?
            .set_default("database.ingest_timeout_secs", 30)?
            .set_default("upload.max_file_bytes", 10 * 1024 * 1024)?
            .set_default("auth.jwt_secret", "menuiq-dev-secret")?
            .set_default("auth.token_ttl_secs", 86_400)?
            .set_default("logging.filter", "info,menuiq=debug")?
            .set_default("logging.json", false)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres {
            self.database.require_url()?;
        }
        if self.upload.max_file_bytes == 0 {
            return Err(ConfigError::Message(
                "upload.max_file_bytes must be greater than zero".to_string(),
            ));
        }
        if self.database.ingest_timeout_secs == 0 || self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "database timeouts must be greater than zero".to_string(),
            ));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
