use secrecy::SecretString;
use serde::Deserialize;

/// Inbound credential check settings (`MCP_AUTH_*`)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Expected bearer credential; required when `enabled` is true
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Header the credential is read from
    #[serde(default = "default_header_name")]
    pub header_name: String,
    /// When false, tool invocations proceed even without a valid
    /// credential and enforcement moves to the transport router
    #[serde(default = "default_require_auth_for_tools")]
    pub require_auth_for_tools: bool,
}

fn default_header_name() -> String {
    "Authorization".to_string()
}

const fn default_require_auth_for_tools() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            header_name: default_header_name(),
            require_auth_for_tools: default_require_auth_for_tools(),
        }
    }
}
