#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod types;

pub use error::{Result, TtsError};
pub use provider::SpeechSynthesizer;
pub use provider::minimax::MinimaxSynthesizer;
pub use types::{SpeechAudio, SpeechRequest, content_type_for};
