//! Typed application settings.
//!
//! Layered: `config/default.toml` (checked in, sane local defaults) under
//! environment overrides with the `WILDTRAILS` prefix and `__` separator,
//! e.g. `WILDTRAILS__SERVER__PORT=9000`. The admin password hash is wrapped
//! in `SecretString` so it never lands in debug output.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection URL, e.g. `sqlite:wildtrails.db?mode=rwc`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// Directory the media buckets live under.
    pub root: PathBuf,
    /// URL prefix the root is served from.
    pub public_base: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminSettings {
    /// Emails allowed into the admin area. Checked by `AllowListPolicy`;
    /// accounts below can still sign in without being listed here and will
    /// see the access-denied panel.
    pub allowed_emails: Vec<String>,
    pub accounts: Vec<AdminAccountSettings>,
}

#[derive(Debug, Deserialize)]
pub struct AdminAccountSettings {
    pub email: String,
    /// PHC-format Argon2 hash.
    pub password_hash: SecretString,
}

/// Loads settings from `config/default.toml` plus the environment.
pub fn load() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(
            config::Environment::with_prefix("WILDTRAILS")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("admin.allowed_emails"),
        )
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
