use secrecy::SecretString;
use serde::Deserialize;

/// Minimax speech API settings (`VOICE_GEN_API_*`)
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// Endpoint of the t2a_v2 speech API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account group identifier, sent as the `GroupId` query parameter
    pub group_id: String,
    /// Bearer credential for the speech API
    pub key: SecretString,
}

fn default_base_url() -> String {
    "https://api.minimax.chat/v1/t2a_v2".to_string()
}

/// Fallbacks applied when a request omits a parameter (`VOICE_GEN_DEFAULT_*`)
#[derive(Debug, Deserialize)]
pub struct SynthesisDefaults {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
}

fn default_model() -> String {
    "speech-2.5-hd-preview".to_string()
}

fn default_voice_id() -> String {
    "mylxsw_voice_1".to_string()
}

impl Default for SynthesisDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            voice_id: default_voice_id(),
        }
    }
}
