use secrecy::SecretString;
use serde::Deserialize;

/// S3-compatible object store settings (`S3_*`)
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub bucket_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Key prefix for every stored object
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Base URL for returned links; when unset the standard
    /// bucket.s3.region URL is derived instead
    #[serde(default)]
    pub public_url_base: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_endpoint() -> String {
    "https://s3.amazonaws.com".to_string()
}

fn default_prefix() -> String {
    "voice-gen/".to_string()
}
