//! S3-compatible object storage for uploaded media (cover images, audio files)

use anyhow::{Context, Result};
use aws_sdk_s3::{
    config::{Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
    Client,
};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub mod config;

/// Longest validity SigV4 allows for a presigned URL
pub const MAX_PRESIGNED_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Key prefix for files uploaded through the API
const UPLOAD_PREFIX: &str = "uploads";

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    public_base_url: Option<String>,
}

impl Storage {
    pub fn new(config: config::StorageConfig) -> Self {
        debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "Initializing storage");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "audiobook-storage",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        info!(bucket = %config.bucket, "Storage client initialized");

        Self {
            client,
            bucket: config.bucket,
            public_base_url: config
                .public_base_url
                .map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    #[instrument(skip(self, data), fields(bucket = %self.bucket))]
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<UploadResult> {
        let checksum = calculate_sha256(&data);
        let size = data.len() as i64;

        debug!(size, "Uploading object");

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request.send().await.context("Failed to upload to S3")?;

        info!(key, size, "Object uploaded");

        Ok(UploadResult {
            key: key.to_string(),
            checksum,
            size,
        })
    }

    /// URL clients use to fetch an object
    ///
    /// With a public base URL configured this is a plain link; otherwise a
    /// presigned GET that expires after [`MAX_PRESIGNED_EXPIRY`].
    pub async fn object_url(&self, key: &str) -> Result<String> {
        match &self.public_base_url {
            Some(base) => Ok(format!("{}/{}", base, key)),
            None => self.generate_presigned_url(key, MAX_PRESIGNED_EXPIRY).await,
        }
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    pub async fn generate_presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .context("Failed to create presigning config")?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .context("Failed to generate presigned URL")?;

        Ok(presigned_request.uri().to_string())
    }

    /// Key for a freshly uploaded file: `uploads/<uuid>-<sanitised name>`
    pub fn build_upload_key(&self, filename: &str) -> String {
        format!(
            "{}/{}-{}",
            UPLOAD_PREFIX,
            uuid::Uuid::new_v4(),
            sanitize_filename(filename)
        )
    }
}

#[derive(Debug, Clone)]
pub struct UploadResult {
    pub key: String,
    pub checksum: String,
    pub size: i64,
}

/// Keep ASCII letters, digits, dots, dashes and underscores; map the rest to `_`
fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn calculate_sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage(public_base_url: Option<&str>) -> Storage {
        let mut config = config::StorageConfig::for_minio("http://localhost:9000", "audiobook-test");
        config.public_base_url = public_base_url.map(str::to_string);
        Storage::new(config)
    }

    #[test]
    fn test_build_upload_key() {
        let storage = test_storage(None);
        let key = storage.build_upload_key("chapter 1.mp3");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with("-chapter_1.mp3"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("cover.png"), "cover.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\music\\song (1).mp3"), "song__1_.mp3");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[tokio::test]
    async fn test_object_url_with_public_base() {
        let storage = test_storage(Some("https://cdn.example.com/media/"));
        let url = storage.object_url("uploads/abc-cover.png").await.unwrap();
        assert_eq!(url, "https://cdn.example.com/media/uploads/abc-cover.png");
    }

    #[test]
    fn test_calculate_sha256() {
        let checksum = calculate_sha256(b"Hello, World!");
        assert_eq!(
            checksum,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }
}
