use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected or never received the upload
    #[error("object upload failed: {0}")]
    Upload(String),

    /// Timestamp arithmetic for the expiration metadata failed
    #[error("timestamp arithmetic failed: {0}")]
    Time(#[from] jiff::Error),
}
