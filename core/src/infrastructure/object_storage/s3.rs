use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, ObjectStorageConfig},
    storage::ports::ObjectStoragePort,
};

/// S3-compatible object storage (MinIO in dev, any S3 endpoint in prod).
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStorage {
    pub async fn new(config: ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "smartpantry",
        );

        let endpoint = config.endpoint.trim_end_matches('/');
        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing object storage client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ObjectStoragePort for S3ObjectStorage {
    #[instrument(skip(self, payload))]
    async fn put_object(
        &self,
        object_key: String,
        payload: Bytes,
        content_type: String,
    ) -> Result<String, CoreError> {
        let payload_size = payload.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(&content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    payload_size,
                    "Failed to upload object"
                );
                CoreError::ExternalServiceError(format!("failed to upload object: {e}"))
            })?;

        tracing::debug!(
            bucket = %self.bucket,
            object_key = %object_key,
            size = payload_size,
            "Object uploaded"
        );
        Ok(object_key)
    }

    #[instrument(skip(self))]
    async fn get_object(&self, object_key: String) -> Result<Bytes, CoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    "Failed to fetch object"
                );
                CoreError::ExternalServiceError(format!("failed to fetch object: {e}"))
            })?;

        let data = output.body.collect().await.map_err(|e| {
            tracing::error!(error = %e, object_key = %object_key, "Failed to read object body");
            CoreError::ExternalServiceError(format!("failed to read object body: {e}"))
        })?;

        Ok(data.into_bytes())
    }

    fn object_url(&self, object_key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, object_key)
    }
}
