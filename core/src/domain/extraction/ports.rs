use std::future::Future;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError, extraction::entities::PantryImageUpload,
};

/// OCR backend. Implementations return `Ok("")` when the engine is not
/// installed or cannot read the image, so the pipeline falls through to
/// the next stage instead of failing the upload.
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    fn extract_text(&self, image: Bytes) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PantryUploadRepository: Send + Sync {
    fn create(
        &self,
        upload: PantryImageUpload,
    ) -> impl Future<Output = Result<PantryImageUpload, CoreError>> + Send;

    fn update(
        &self,
        upload: PantryImageUpload,
    ) -> impl Future<Output = Result<PantryImageUpload, CoreError>> + Send;

    fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<PantryImageUpload>, CoreError>> + Send;

    /// Upload history, newest first.
    fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<PantryImageUpload>, CoreError>> + Send;
}
