use axum::extract::{Path, State};
use smartpantry_core::domain::extraction::entities::PantryImageUpload;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/pantry/extract/{upload_id}",
    tag = "extraction",
    summary = "Reload an upload's candidates",
    params(("upload_id" = Uuid, Path, description = "Pantry upload id")),
    responses(
        (status = 200, body = PantryImageUpload),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_upload(
    Path(upload_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<PantryImageUpload>, ApiError> {
    let upload = state.extraction_service.get(&identity, upload_id).await?;
    Ok(Response::OK(upload))
}
