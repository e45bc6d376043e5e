//! Media attachment gateway: object storage for report photos.
//!
//! Upload failures are fatal to the caller; delete failures are reported as
//! `false` and left to the caller to log, since losing an orphaned photo is
//! preferable to losing the report record.

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// Object storage contract consumed by the report lifecycle engine.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `bytes` under a collision-free name inside `folder` and return
    /// a stable dereferenceable locator.
    async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
        original_name: &str,
        folder: &str,
    ) -> Result<String>;

    /// Remove the object behind `locator` if present; true when a deletion
    /// occurred. An unparsable locator yields false, never an error.
    async fn delete(&self, locator: &str) -> bool;

    async fn exists(&self, locator: &str) -> bool;
}

/// S3-backed implementation. The bucket is created on first use.
pub struct S3MediaStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaStorage {
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "waste-report-service",
        );

        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let public_base_url = match &config.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", config.bucket, config.region),
        };

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url,
        }
    }

    async fn ensure_bucket(&self) -> Result<()> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!("failed to create bucket {}: {e}", self.bucket))
            })?;

        info!("created storage bucket {}", self.bucket);
        Ok(())
    }

    /// Map a locator back to its object key. None when the locator was not
    /// produced by this gateway.
    fn object_key(&self, locator: &str) -> Option<String> {
        locator
            .strip_prefix(&format!("{}/", self.public_base_url))
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}

/// Collision-free object key: folder + random token + original extension.
fn unique_object_key(folder: &str, original_name: &str) -> String {
    let extension = original_name
        .rfind('.')
        .map(|idx| &original_name[idx..])
        .unwrap_or("");
    format!("{folder}/{}{extension}", Uuid::new_v4())
}

#[async_trait]
impl MediaStorage for S3MediaStorage {
    async fn upload(
        &self,
        bytes: &[u8],
        content_type: &str,
        original_name: &str,
        folder: &str,
    ) -> Result<String> {
        if bytes.is_empty() {
            return Err(AppError::UploadFailed("file is empty".to_string()));
        }

        self.ensure_bucket().await?;

        let key = unique_object_key(folder, original_name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| AppError::UploadFailed(format!("failed to upload {key}: {e}")))?;

        let locator = format!("{}/{}", self.public_base_url, key);
        info!("uploaded media object {locator}");
        Ok(locator)
    }

    async fn delete(&self, locator: &str) -> bool {
        let Some(key) = self.object_key(locator) else {
            warn!("could not extract object key from locator: {locator}");
            return false;
        };

        // head first so the return value reflects whether anything was removed
        if self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .is_err()
        {
            warn!("media object not found for deletion: {locator}");
            return false;
        }

        match self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(_) => {
                info!("deleted media object {locator}");
                true
            }
            Err(e) => {
                error!("failed to delete media object {locator}: {e}");
                false
            }
        }
    }

    async fn exists(&self, locator: &str) -> bool {
        let Some(key) = self.object_key(locator) else {
            return false;
        };

        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .is_ok()
    }
}
