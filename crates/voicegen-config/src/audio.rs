use serde::Deserialize;

/// Output audio settings forwarded to the synthesis API (`VOICE_GEN_AUDIO_*`)
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_bitrate")]
    pub bitrate: u32,
    /// Container format (mp3, wav, flac, aac, pcm); also names the
    /// stored object's extension
    #[serde(default = "default_format")]
    pub format: String,
}

const fn default_sample_rate() -> u32 {
    32_000
}

const fn default_bitrate() -> u32 {
    128_000
}

fn default_format() -> String {
    "mp3".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            bitrate: default_bitrate(),
            format: default_format(),
        }
    }
}
