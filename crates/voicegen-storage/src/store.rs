use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::{ByteStream, DateTime};
use jiff::{Timestamp, ToSpan, tz::TimeZone};
use secrecy::ExposeSecret;
use voicegen_config::StorageConfig;

use crate::error::StorageError;
use crate::key::{object_key, unique_suffix};

/// Expiration tag attached to every stored object; actual deletion is
/// the bucket lifecycle policy's job, never this process's.
const RETENTION_DAYS: i64 = 30;

/// Descriptor of one uploaded audio object
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Public-facing URL of the object
    pub url: String,
    /// Bucket key the object was written under
    pub key: String,
    /// Uploaded size in bytes
    pub size: u64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Capability seam for audio persistence backends
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Upload one audio object and return its public descriptor
    async fn upload(
        &self,
        audio: &[u8],
        content_type: &str,
        category: &str,
    ) -> crate::error::Result<StoredObject>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// S3-compatible audio store
pub struct S3AudioStore {
    client: Client,
    bucket: String,
    region: String,
    prefix: String,
    format: String,
    public_url_base: Option<String>,
}

impl S3AudioStore {
    /// Build a store from configuration; no network calls are made
    /// until the first upload.
    pub fn new(config: &StorageConfig, audio_format: &str) -> Self {
        let credentials = Credentials::from_keys(
            config.access_key_id.clone(),
            config.secret_access_key.expose_secret().to_string(),
            None,
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket_name.clone(),
            region: config.region.clone(),
            prefix: config.prefix.clone(),
            format: audio_format.to_string(),
            // An empty base means unset; fall back to the derived URL
            public_url_base: config
                .public_url_base
                .clone()
                .filter(|base| !base.trim().is_empty()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        self.public_url_base.as_ref().map_or_else(
            || format!("https://{}.s3.{}.amazonaws.com/{key}", self.bucket, self.region),
            |base| format!("{}/{key}", base.trim_end_matches('/')),
        )
    }
}

#[async_trait]
impl AudioStore for S3AudioStore {
    async fn upload(
        &self,
        audio: &[u8],
        content_type: &str,
        category: &str,
    ) -> crate::error::Result<StoredObject> {
        let created = Timestamp::now().to_zoned(TimeZone::UTC);
        let expires = created.checked_add(RETENTION_DAYS.days())?;

        let unique_id = unique_suffix();
        let key = object_key(&self.prefix, created.date(), &unique_id, category, &self.format);

        let created_at = created.timestamp();
        let expires_at = expires.timestamp();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(audio.to_vec()))
            .content_type(content_type)
            .metadata("created-date", created_at.to_string())
            .metadata("expiration-date", expires_at.to_string())
            .metadata("unique-id", &unique_id)
            .expires(DateTime::from_secs(expires_at.as_second()))
            .send()
            .await
            .map_err(|e| {
                let message = aws_sdk_s3::error::DisplayErrorContext(e).to_string();
                tracing::error!("S3 upload failed for key {key}: {message}");
                StorageError::Upload(message)
            })?;

        let url = self.public_url(&key);

        tracing::info!(
            "audio uploaded: {} ({} bytes, expires {expires_at})",
            key,
            audio.len(),
        );

        Ok(StoredObject {
            url,
            key,
            size: audio.len() as u64,
            created_at,
            expires_at,
        })
    }

    fn name(&self) -> &str {
        "s3"
    }
}
