/// Fully resolved synthesis request
///
/// Defaults from configuration are already applied; providers receive
/// concrete values only.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub model: String,
    pub voice_id: String,
    /// Speech speed multiplier (nominal range 0.5 to 2.0)
    pub speed: f64,
}

/// Raw audio produced by a synthesis provider
///
/// The bytes are returned exactly as the upstream API produced them;
/// nothing here decodes or validates audio content.
#[derive(Debug)]
pub struct SpeechAudio {
    pub audio: Vec<u8>,
    pub content_type: String,
}

/// MIME type for a configured container format
pub fn content_type_for(format: &str) -> &'static str {
    match format {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "pcm" => "audio/pcm",
        _ => "application/octet-stream",
    }
}
