//! End-to-end dispatcher scenarios with substituted capability backends.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use jiff::Timestamp;
use secrecy::SecretString;
use voicegen_config::{
    ApiConfig, AudioConfig, AuthConfig, Config, ServerConfig, StorageConfig, SynthesisDefaults,
};
use voicegen_server::{DispatchError, Dispatcher, GenerateVoiceParams};
use voicegen_storage::{AudioStore, StorageError, StoredObject};
use voicegen_tts::{SpeechAudio, SpeechRequest, SpeechSynthesizer, TtsError};

enum SynthOutcome {
    Bytes(Vec<u8>),
    HttpStatus(u16),
}

struct MockSynthesizer {
    calls: AtomicUsize,
    last_request: Mutex<Option<SpeechRequest>>,
    outcome: SynthOutcome,
}

impl MockSynthesizer {
    fn returning(bytes: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            outcome: SynthOutcome::Bytes(bytes),
        })
    }

    fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            outcome: SynthOutcome::HttpStatus(status),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, request: &SpeechRequest) -> voicegen_tts::Result<SpeechAudio> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.outcome {
            SynthOutcome::Bytes(bytes) => Ok(SpeechAudio {
                audio: bytes.clone(),
                content_type: "audio/mpeg".to_string(),
            }),
            SynthOutcome::HttpStatus(status) => Err(TtsError::Api {
                status: *status,
                message: "upstream failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct MockStore {
    calls: AtomicUsize,
    uploads: Mutex<Vec<Vec<u8>>>,
    deny: bool,
}

impl MockStore {
    fn accepting() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
            deny: false,
        })
    }

    fn denying() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
            deny: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioStore for MockStore {
    async fn upload(
        &self,
        audio: &[u8],
        _content_type: &str,
        category: &str,
    ) -> voicegen_storage::Result<StoredObject> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(audio.to_vec());

        if self.deny {
            return Err(StorageError::Upload("access denied".to_string()));
        }

        let key = format!("voice-gen/2024/05/17_abcd1234_{category}.mp3");
        Ok(StoredObject {
            url: format!("https://voice-bucket.s3.us-east-1.amazonaws.com/{key}"),
            key,
            size: audio.len() as u64,
            created_at: Timestamp::UNIX_EPOCH,
            expires_at: Timestamp::UNIX_EPOCH,
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn test_config(auth: AuthConfig) -> Arc<Config> {
    Arc::new(Config {
        api: ApiConfig {
            base_url: "https://api.minimax.chat/v1/t2a_v2".to_string(),
            group_id: "group-1".to_string(),
            key: SecretString::from("tts-secret"),
        },
        defaults: SynthesisDefaults::default(),
        audio: AudioConfig::default(),
        storage: StorageConfig {
            bucket_name: "voice-bucket".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "AKIA_TEST".to_string(),
            secret_access_key: SecretString::from("s3-secret"),
            endpoint: "https://s3.amazonaws.com".to_string(),
            prefix: "voice-gen/".to_string(),
            public_url_base: None,
        },
        auth,
        server: ServerConfig::default(),
    })
}

fn enabled_auth() -> AuthConfig {
    AuthConfig {
        enabled: true,
        api_key: Some(SecretString::from("sk-voice-1")),
        ..AuthConfig::default()
    }
}

fn dispatcher(
    auth: AuthConfig,
    synthesizer: &Arc<MockSynthesizer>,
    store: &Arc<MockStore>,
) -> Dispatcher {
    Dispatcher::new(
        test_config(auth),
        Arc::clone(synthesizer) as Arc<dyn SpeechSynthesizer>,
        Arc::clone(store) as Arc<dyn AudioStore>,
    )
}

fn params(text: &str) -> GenerateVoiceParams {
    GenerateVoiceParams {
        text: text.to_string(),
        model: None,
        voice_id: None,
        speed: None,
    }
}

fn bearer(credential: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::AUTHORIZATION,
        format!("Bearer {credential}").parse().unwrap(),
    );
    headers
}

#[tokio::test]
async fn empty_text_fails_without_contacting_collaborators() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let err = dispatcher.dispatch(params(""), None).await.unwrap_err();

    assert!(matches!(err, DispatchError::InvalidInput(_)));
    assert_eq!(synthesizer.calls(), 0);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn whitespace_text_is_treated_as_empty() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let err = dispatcher.dispatch(params("   \n"), None).await.unwrap_err();

    assert!(matches!(err, DispatchError::InvalidInput(_)));
    assert_eq!(synthesizer.calls(), 0);
}

#[tokio::test]
async fn out_of_range_speed_is_rejected_locally() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let mut request = params("Hello world");
    request.speed = Some(3.5);
    let err = dispatcher.dispatch(request, None).await.unwrap_err();

    assert!(matches!(err, DispatchError::InvalidInput(_)));
    assert_eq!(synthesizer.calls(), 0);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn missing_credential_fails_before_any_downstream_call() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(enabled_auth(), &synthesizer, &store);

    let err = dispatcher
        .dispatch(params("Hello world"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Unauthorized(_)));
    assert_eq!(synthesizer.calls(), 0);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn wrong_credential_fails_before_any_downstream_call() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(enabled_auth(), &synthesizer, &store);

    let headers = bearer("sk-voice-2");
    let err = dispatcher
        .dispatch(params("Hello world"), Some(&headers))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Unauthorized(_)));
    assert_eq!(synthesizer.calls(), 0);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn valid_credential_generates_and_uploads() {
    let synthesizer = MockSynthesizer::returning(vec![0u8; 12_345]);
    let store = MockStore::accepting();
    let dispatcher = dispatcher(enabled_auth(), &synthesizer, &store);

    let headers = bearer("sk-voice-1");
    let stored = dispatcher
        .dispatch(params("Hello world"), Some(&headers))
        .await
        .unwrap();

    assert_eq!(
        stored.url,
        "https://voice-bucket.s3.us-east-1.amazonaws.com/voice-gen/2024/05/17_abcd1234_voice.mp3",
    );
    assert_eq!(stored.size, 12_345);
    assert_eq!(synthesizer.calls(), 1);
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn disabled_auth_accepts_any_header_content() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let headers = bearer("complete-nonsense");
    let stored = dispatcher
        .dispatch(params("Hello world"), Some(&headers))
        .await
        .unwrap();

    assert_eq!(stored.size, 5);
}

#[tokio::test]
async fn synthesized_bytes_reach_the_store_unmodified() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let synthesizer = MockSynthesizer::returning(bytes.clone());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    dispatcher.dispatch(params("Hello world"), None).await.unwrap();

    let uploads = store.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0], bytes);
}

#[tokio::test]
async fn upstream_failure_skips_the_upload() {
    let synthesizer = MockSynthesizer::failing_with_status(500);
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let err = dispatcher
        .dispatch(params("Hello world"), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Synthesis(TtsError::Api { status: 500, .. })
    ));
    assert_eq!(synthesizer.calls(), 1);
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn storage_denial_surfaces_as_storage_failure() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::denying();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let err = dispatcher
        .dispatch(params("Hello world"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Storage(StorageError::Upload(_))));
    assert_eq!(store.calls(), 1);
}

#[tokio::test]
async fn configuration_defaults_fill_missing_parameters() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    dispatcher.dispatch(params("Hello world"), None).await.unwrap();

    let request = synthesizer.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "speech-2.5-hd-preview");
    assert_eq!(request.voice_id, "mylxsw_voice_1");
    assert!((request.speed - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn explicit_parameters_override_defaults() {
    let synthesizer = MockSynthesizer::returning(b"audio".to_vec());
    let store = MockStore::accepting();
    let dispatcher = dispatcher(AuthConfig::default(), &synthesizer, &store);

    let request = GenerateVoiceParams {
        text: "Hello world".to_string(),
        model: Some("speech-01-turbo".to_string()),
        voice_id: Some("narrator_2".to_string()),
        speed: Some(1.5),
    };
    dispatcher.dispatch(request, None).await.unwrap();

    let seen = synthesizer.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(seen.model, "speech-01-turbo");
    assert_eq!(seen.voice_id, "narrator_2");
    assert!((seen.speed - 1.5).abs() < f64::EPSILON);
}
