use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};
use secrecy::ExposeSecret;
use voicegen_config::AuthConfig;

/// Endpoint class being protected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScope {
    /// A tool invocation
    Tools,
    /// Anything else served over the network transports
    Endpoint,
}

/// Outcome of the credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingCredential,
    InvalidCredential,
}

impl DenyReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingCredential => "missing credential",
            Self::InvalidCredential => "invalid credential",
        }
    }
}

/// Decide whether one request may proceed
///
/// Pure over the request's headers and the immutable auth settings.
/// `None` headers model transports that carry none (the stdio pipe).
/// With `require_auth_for_tools` off, tool invocations pass unchecked
/// and enforcement belongs to the router-wide [`require_auth`] layer.
pub fn authorize(
    headers: Option<&HeaderMap>,
    config: &AuthConfig,
    scope: AuthScope,
) -> AuthDecision {
    if !config.enabled {
        return AuthDecision::Allow;
    }

    if scope == AuthScope::Tools && !config.require_auth_for_tools {
        return AuthDecision::Allow;
    }

    // Enabled-without-key is rejected at startup; nothing can match here
    let Some(expected) = config.api_key.as_ref() else {
        return AuthDecision::Deny(DenyReason::InvalidCredential);
    };

    match headers.and_then(|headers| extract_credential(headers, &config.header_name)) {
        None => AuthDecision::Deny(DenyReason::MissingCredential),
        Some(given) if constant_time_eq(given.as_bytes(), expected.expose_secret().as_bytes()) => {
            AuthDecision::Allow
        }
        Some(_) => AuthDecision::Deny(DenyReason::InvalidCredential),
    }
}

/// Read the credential from the configured header, stripping an
/// optional `Bearer ` prefix
fn extract_credential<'a>(headers: &'a HeaderMap, header_name: &str) -> Option<&'a str> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value))
}

/// Comparison time must not depend on how much of the credential matched
fn constant_time_eq(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Router-wide credential check for the network transports
///
/// Applied when auth is enabled but tool-level enforcement is off,
/// so every endpoint behind the router requires the credential.
pub async fn require_auth(config: AuthConfig, request: Request, next: Next) -> Response {
    match authorize(Some(request.headers()), &config, AuthScope::Endpoint) {
        AuthDecision::Allow => next.run(request).await,
        AuthDecision::Deny(reason) => {
            tracing::warn!("request rejected: {}", reason.message());
            (StatusCode::UNAUTHORIZED, reason.message()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn enabled_config() -> AuthConfig {
        AuthConfig {
            enabled: true,
            api_key: Some(SecretString::from("sk-voice-1")),
            ..AuthConfig::default()
        }
    }

    fn headers_with(name: &str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::HeaderName::try_from(name).unwrap(),
            value.parse().unwrap(),
        );
        headers
    }

    #[test]
    fn disabled_auth_allows_anything() {
        let config = AuthConfig::default();
        let headers = headers_with("Authorization", "Bearer nonsense");

        assert_eq!(
            authorize(Some(&headers), &config, AuthScope::Tools),
            AuthDecision::Allow
        );
        assert_eq!(authorize(None, &config, AuthScope::Tools), AuthDecision::Allow);
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let config = enabled_config();
        let headers = headers_with("Authorization", "Bearer sk-voice-1");

        assert_eq!(
            authorize(Some(&headers), &config, AuthScope::Tools),
            AuthDecision::Allow
        );
    }

    #[test]
    fn bare_credential_is_accepted() {
        let config = enabled_config();
        let headers = headers_with("Authorization", "sk-voice-1");

        assert_eq!(
            authorize(Some(&headers), &config, AuthScope::Tools),
            AuthDecision::Allow
        );
    }

    #[test]
    fn absent_credential_is_denied_as_missing() {
        let config = enabled_config();

        assert_eq!(
            authorize(Some(&HeaderMap::new()), &config, AuthScope::Tools),
            AuthDecision::Deny(DenyReason::MissingCredential)
        );
        assert_eq!(
            authorize(None, &config, AuthScope::Tools),
            AuthDecision::Deny(DenyReason::MissingCredential)
        );
    }

    #[test]
    fn wrong_credential_is_denied_as_invalid() {
        let config = enabled_config();
        let headers = headers_with("Authorization", "Bearer sk-voice-2");

        assert_eq!(
            authorize(Some(&headers), &config, AuthScope::Tools),
            AuthDecision::Deny(DenyReason::InvalidCredential)
        );
    }

    #[test]
    fn configured_header_name_is_honored() {
        let config = AuthConfig {
            header_name: "X-API-Key".to_string(),
            ..enabled_config()
        };

        let custom = headers_with("X-API-Key", "sk-voice-1");
        assert_eq!(
            authorize(Some(&custom), &config, AuthScope::Tools),
            AuthDecision::Allow
        );

        // The default header is not consulted once another is configured
        let default = headers_with("Authorization", "Bearer sk-voice-1");
        assert_eq!(
            authorize(Some(&default), &config, AuthScope::Tools),
            AuthDecision::Deny(DenyReason::MissingCredential)
        );
    }

    #[test]
    fn tool_scope_passes_when_tool_enforcement_is_off() {
        let config = AuthConfig {
            require_auth_for_tools: false,
            ..enabled_config()
        };

        assert_eq!(authorize(None, &config, AuthScope::Tools), AuthDecision::Allow);
        assert_eq!(
            authorize(None, &config, AuthScope::Endpoint),
            AuthDecision::Deny(DenyReason::MissingCredential)
        );
    }

    #[test]
    fn credential_comparison_rejects_prefix_match() {
        let config = enabled_config();
        let headers = headers_with("Authorization", "Bearer sk-voice-");

        assert_eq!(
            authorize(Some(&headers), &config, AuthScope::Tools),
            AuthDecision::Deny(DenyReason::InvalidCredential)
        );
    }
}
