use thiserror::Error;

/// Configuration errors, raised only at startup
///
/// The process must not begin serving on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("missing required environment variable: {0}")]
    MissingVariable(String),

    /// A variable is present but cannot be used as its setting
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
