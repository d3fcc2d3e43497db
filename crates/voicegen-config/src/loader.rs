use serde::de::DeserializeOwned;

use crate::ConfigError;

pub(crate) const API_PREFIX: &str = "VOICE_GEN_API_";
pub(crate) const DEFAULTS_PREFIX: &str = "VOICE_GEN_DEFAULT_";
pub(crate) const AUDIO_PREFIX: &str = "VOICE_GEN_AUDIO_";
pub(crate) const STORAGE_PREFIX: &str = "S3_";
pub(crate) const AUTH_PREFIX: &str = "MCP_AUTH_";
pub(crate) const SERVER_PREFIX: &str = "MCP_";

/// Deserialize one prefixed section of the process environment
///
/// Maps a missing field back to its full variable name so startup
/// failures point at the exact variable to set.
pub(crate) fn section<T: DeserializeOwned>(prefix: &str) -> Result<T, ConfigError> {
    envy::prefixed(prefix).from_env().map_err(|e| match e {
        envy::Error::MissingValue(field) => {
            ConfigError::MissingVariable(format!("{prefix}{}", field.to_uppercase()))
        }
        envy::Error::Custom(message) => ConfigError::Invalid(message),
    })
}
