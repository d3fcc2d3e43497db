pub mod minimax;

use async_trait::async_trait;

use crate::types::{SpeechAudio, SpeechRequest};

/// Capability seam for speech synthesis backends
///
/// The dispatcher only sees this trait, so test doubles can stand in
/// for the real API.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text to raw audio bytes
    async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechAudio>;

    /// Get the provider name
    fn name(&self) -> &str;
}
