use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use voicegen_config::{ApiConfig, AudioConfig};

use crate::{
    error::TtsError,
    http_client::http_client,
    types::{SpeechAudio, SpeechRequest, content_type_for},
};

use super::SpeechSynthesizer;

/// Minimax t2a speech provider
///
/// The API returns the audio payload hex-encoded inside a JSON
/// envelope rather than as a binary body.
pub struct MinimaxSynthesizer {
    client: Client,
    base_url: String,
    group_id: String,
    api_key: SecretString,
    audio: AudioConfig,
}

impl MinimaxSynthesizer {
    pub fn new(api: &ApiConfig, audio: &AudioConfig) -> Self {
        Self {
            client: http_client(),
            base_url: api.base_url.clone(),
            group_id: api.group_id.clone(),
            api_key: api.key.clone(),
            audio: audio.clone(),
        }
    }

    fn payload<'a>(&'a self, request: &'a SpeechRequest) -> MinimaxRequest<'a> {
        MinimaxRequest {
            model: &request.model,
            text: &request.text,
            timber_weights: [TimberWeight {
                voice_id: &request.voice_id,
                weight: 1,
            }],
            voice_setting: VoiceSetting {
                voice_id: "",
                speed: request.speed,
                pitch: 0,
                vol: 1,
                latex_read: false,
            },
            audio_setting: AudioSetting {
                sample_rate: self.audio.sample_rate,
                bitrate: self.audio.bitrate,
                format: &self.audio.format,
            },
            language_boost: "auto",
        }
    }
}

#[derive(serde::Serialize)]
struct MinimaxRequest<'a> {
    model: &'a str,
    text: &'a str,
    timber_weights: [TimberWeight<'a>; 1],
    voice_setting: VoiceSetting<'a>,
    audio_setting: AudioSetting<'a>,
    language_boost: &'a str,
}

#[derive(serde::Serialize)]
struct TimberWeight<'a> {
    voice_id: &'a str,
    weight: u32,
}

#[derive(serde::Serialize)]
struct VoiceSetting<'a> {
    voice_id: &'a str,
    speed: f64,
    pitch: i32,
    vol: u32,
    latex_read: bool,
}

#[derive(serde::Serialize)]
struct AudioSetting<'a> {
    sample_rate: u32,
    bitrate: u32,
    format: &'a str,
}

#[derive(serde::Deserialize)]
struct MinimaxResponse {
    #[serde(default)]
    data: Option<AudioData>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(serde::Deserialize)]
struct AudioData {
    #[serde(default)]
    audio: Option<String>,
}

#[derive(serde::Deserialize)]
struct BaseResp {
    #[serde(default)]
    status_msg: Option<String>,
}

#[async_trait]
impl SpeechSynthesizer for MinimaxSynthesizer {
    async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechAudio> {
        if request.text.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let url = format!("{}?GroupId={}", self.base_url, self.group_id);

        tracing::debug!(
            "Minimax TTS request: model={}, voice={}, speed={}, text_len={}",
            request.model,
            request.voice_id,
            request.speed,
            request.text.len(),
        );

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&self.payload(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Minimax request failed: {e}");
                TtsError::Connection(format!("Failed to send request to Minimax: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Minimax API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let body: MinimaxResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Minimax response body: {e}");
            TtsError::ParseResponse(e.to_string())
        })?;

        let Some(hex_audio) = body.data.and_then(|data| data.audio) else {
            let detail = body
                .base_resp
                .and_then(|resp| resp.status_msg)
                .unwrap_or_else(|| "response body carries no audio payload".to_string());
            return Err(TtsError::UnexpectedResponse(detail));
        };

        let audio = hex::decode(hex_audio)?;

        tracing::debug!("Minimax TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechAudio {
            audio,
            content_type: content_type_for(&self.audio.format).to_string(),
        })
    }

    fn name(&self) -> &str {
        "minimax"
    }
}
