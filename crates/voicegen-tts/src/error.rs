use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    /// Request carried no text to synthesize
    #[error("text cannot be empty")]
    EmptyText,

    /// The synthesis API rejected the credentials
    #[error("synthesis API authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The synthesis API rejected the request parameters
    #[error("synthesis API rejected the request: {0}")]
    InvalidRequest(String),

    /// Any other non-success status from the synthesis API
    #[error("synthesis API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never reached the synthesis API
    #[error("failed to reach synthesis API: {0}")]
    Connection(String),

    /// The response body was not the expected JSON shape
    #[error("failed to parse synthesis response: {0}")]
    ParseResponse(String),

    /// A well-formed response without an audio payload
    #[error("unexpected synthesis response: {0}")]
    UnexpectedResponse(String),

    /// The audio payload was not valid hex
    #[error("failed to decode audio payload: {0}")]
    DecodeAudio(#[from] hex::FromHexError),
}
