use std::ops::RangeInclusive;
use std::sync::Arc;

use http::HeaderMap;
use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;
use voicegen_config::Config;
use voicegen_storage::{AudioStore, StorageError, StoredObject};
use voicegen_tts::{SpeechRequest, SpeechSynthesizer, TtsError};

use crate::auth::{AuthDecision, AuthScope, authorize};

/// Speed values accepted before anything is sent upstream
const SPEED_RANGE: RangeInclusive<f64> = 0.5..=2.0;

const DEFAULT_SPEED: f64 = 1.0;

/// Category component of every stored object key
const AUDIO_CATEGORY: &str = "voice";

/// Parameters of the `generate_voice` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateVoiceParams {
    /// The text to convert to speech
    pub text: String,
    /// Model to use for generation (defaults from configuration)
    #[serde(default)]
    pub model: Option<String>,
    /// Voice ID to use (defaults from configuration)
    #[serde(default)]
    pub voice_id: Option<String>,
    /// Speech speed multiplier between 0.5 and 2.0 (default 1.0)
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Terminal failure of one tool invocation
///
/// Every variant is surfaced to the caller as a structured failure
/// result; nothing here is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("authentication required: {0}")]
    Unauthorized(&'static str),

    #[error("voice generation error: {0}")]
    Synthesis(#[from] TtsError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Orchestrates one `generate_voice` invocation
///
/// Validates, authorizes, synthesizes, then uploads, stopping at the
/// first failure. Holds no state besides the configuration and the
/// two capability handles, so invocations are independent.
pub struct Dispatcher {
    config: Arc<Config>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn AudioStore>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<Config>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            config,
            synthesizer,
            store,
        }
    }

    /// Run one invocation to completion
    ///
    /// `headers` carries the inbound request headers when the
    /// transport has any; the stdio pipe passes `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] for invalid parameters, a failed
    /// credential check, or a synthesis/upload failure. Upload is
    /// never attempted after a synthesis failure, and a failed upload
    /// discards the audio without compensation.
    pub async fn dispatch(
        &self,
        params: GenerateVoiceParams,
        headers: Option<&HeaderMap>,
    ) -> Result<StoredObject, DispatchError> {
        if params.text.trim().is_empty() {
            return Err(DispatchError::InvalidInput("text cannot be empty".to_string()));
        }

        let speed = params.speed.unwrap_or(DEFAULT_SPEED);
        if !SPEED_RANGE.contains(&speed) {
            return Err(DispatchError::InvalidInput(format!(
                "speed {speed} is outside the supported range {} to {}",
                SPEED_RANGE.start(),
                SPEED_RANGE.end(),
            )));
        }

        if let AuthDecision::Deny(reason) = authorize(headers, &self.config.auth, AuthScope::Tools)
        {
            tracing::warn!("generate_voice rejected: {}", reason.message());
            return Err(DispatchError::Unauthorized(reason.message()));
        }

        let request = SpeechRequest {
            text: params.text,
            model: params
                .model
                .unwrap_or_else(|| self.config.defaults.model.clone()),
            voice_id: params
                .voice_id
                .unwrap_or_else(|| self.config.defaults.voice_id.clone()),
            speed,
        };

        tracing::info!(
            "generating voice: model={}, voice={}, text_len={}",
            request.model,
            request.voice_id,
            request.text.len(),
        );

        let audio = self.synthesizer.synthesize(&request).await?;

        tracing::debug!("voice generated ({} bytes), uploading", audio.audio.len());

        let stored = self
            .store
            .upload(&audio.audio, &audio.content_type, AUDIO_CATEGORY)
            .await?;

        tracing::info!("voice uploaded: {} ({} bytes)", stored.url, stored.size);

        Ok(stored)
    }
}
