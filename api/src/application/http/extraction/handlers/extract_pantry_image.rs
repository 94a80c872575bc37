use axum::{
    body::Bytes,
    extract::{Multipart, State},
};
use smartpantry_core::domain::extraction::entities::PantryImageUpload;
use tracing::error;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10 MB

#[utoipa::path(
    post,
    path = "/pantry/extract",
    tag = "extraction",
    summary = "Upload a pantry photo",
    description = "Stores the image and runs the extraction ladder (OCR, vision, demo \
fallback). Returns the upload with its candidate rows for review.",
    responses(
        (status = 201, body = PantryImageUpload),
        (status = 400, description = "Missing or non-image file"),
        (status = 413, description = "Image too large")
    )
)]
pub async fn extract_pantry_image(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    mut multipart: Multipart,
) -> Result<Response<PantryImageUpload>, ApiError> {
    let mut content_type: Option<String> = None;
    let mut image_data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("failed to read multipart field: {e}"))
    })? {
        if field.name() != Some("image") {
            continue;
        }

        content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read image bytes: {}", e);
            ApiError::BadRequest(format!("failed to read image: {e}"))
        })?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "image too large, max {MAX_IMAGE_SIZE} bytes"
            )));
        }
        image_data = Some(data);
    }

    let image_data = image_data
        .ok_or_else(|| ApiError::BadRequest("missing 'image' field in multipart form".to_string()))?;
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    let upload = state
        .extraction_service
        .upload_and_extract(&identity, image_data, content_type)
        .await?;

    Ok(Response::Created(upload))
}
