use std::future::Future;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// "Save bytes, get a URL back" seam so local/dev MinIO and cloud S3
/// stay interchangeable. Used for pantry photo uploads and cached recipe
/// thumbnails.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStoragePort: Send + Sync {
    /// Stores the payload under the given key and returns the key.
    fn put_object(
        &self,
        object_key: String,
        payload: Bytes,
        content_type: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn get_object(
        &self,
        object_key: String,
    ) -> impl Future<Output = Result<Bytes, CoreError>> + Send;

    /// Publicly reachable URL for a stored object.
    fn object_url(&self, object_key: &str) -> String;
}
