use axum::extract::State;
use smartpantry_core::domain::extraction::entities::PantryImageUpload;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/pantry/uploads",
    tag = "extraction",
    summary = "Upload history",
    responses((status = 200, body = Vec<PantryImageUpload>))
)]
pub async fn get_uploads(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Vec<PantryImageUpload>>, ApiError> {
    let uploads = state.extraction_service.history(&identity).await?;
    Ok(Response::OK(uploads))
}
