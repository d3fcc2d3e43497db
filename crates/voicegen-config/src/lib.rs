#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod audio;
pub mod auth;
mod error;
mod loader;
pub mod server;
pub mod storage;

pub use api::{ApiConfig, SynthesisDefaults};
pub use audio::AudioConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use server::{ServerConfig, Transport};
pub use storage::StorageConfig;

use secrecy::ExposeSecret;

/// Immutable process-wide configuration
///
/// Built once at startup from environment variables and handed by
/// reference into each component; nothing reads the environment after
/// this point.
#[derive(Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: SynthesisDefaults,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load and validate every recognized setting from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the variable when a required
    /// setting is absent or empty, or when a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            api: loader::section(loader::API_PREFIX)?,
            defaults: loader::section(loader::DEFAULTS_PREFIX)?,
            audio: loader::section(loader::AUDIO_PREFIX)?,
            storage: loader::section(loader::STORAGE_PREFIX)?,
            auth: loader::section(loader::AUTH_PREFIX)?,
            server: loader::section(loader::SERVER_PREFIX)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    fn validate(&self) -> Result<(), ConfigError> {
        require_nonempty("VOICE_GEN_API_GROUP_ID", &self.api.group_id)?;
        require_nonempty("VOICE_GEN_API_KEY", self.api.key.expose_secret())?;
        require_nonempty("S3_BUCKET_NAME", &self.storage.bucket_name)?;
        require_nonempty("S3_ACCESS_KEY_ID", &self.storage.access_key_id)?;
        require_nonempty(
            "S3_SECRET_ACCESS_KEY",
            self.storage.secret_access_key.expose_secret(),
        )?;

        if self.auth.enabled
            && !self
                .auth
                .api_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "authentication is enabled but MCP_AUTH_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }
}

/// An empty value is treated the same as an absent variable
fn require_nonempty(variable: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingVariable(variable.to_string()));
    }
    Ok(())
}
