/// Server configuration
use crate::error::{Result, ServerError};
use crate::services::auth::MIN_SECRET_LEN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_audio_storage_path")]
    pub audio_storage_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub secret_key: String,

    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,

    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

impl AuthSettings {
    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_ttl_minutes)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_token_ttl_days)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// read when present. `AUDIOSHARE_*` variables override file values, with
    /// `__` between section and key (`AUDIOSHARE_AUTH__SECRET_KEY`). A plain
    /// `SECRET_KEY` is used when no secret was configured otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("AUDIOSHARE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if config.auth.secret_key.is_empty() {
            if let Ok(secret) = std::env::var("SECRET_KEY") {
                config.auth.secret_key = secret;
            }
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret_key.is_empty() {
            return Err(ServerError::Config(
                "secret key is required (set SECRET_KEY or AUDIOSHARE_AUTH__SECRET_KEY)"
                    .to_string(),
            ));
        }

        if self.auth.secret_key.len() < MIN_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "secret key must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        if self.auth.access_token_ttl_minutes <= 0 || self.auth.refresh_token_ttl_days <= 0 {
            return Err(ServerError::Config(
                "token lifetimes must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        audio_storage_path: default_audio_storage_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/audioshare.db".to_string()
}

fn default_audio_storage_path() -> PathBuf {
    PathBuf::from("./data/audio")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        secret_key: String::new(),
        access_token_ttl_minutes: default_access_token_ttl_minutes(),
        refresh_token_ttl_days: default_refresh_token_ttl_days(),
    }
}

fn default_access_token_ttl_minutes() -> i64 {
    15
}

fn default_refresh_token_ttl_days() -> i64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}
