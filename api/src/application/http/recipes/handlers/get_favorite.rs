use axum::extract::{Path, State};
use smartpantry_core::domain::recipes::entities::SavedRecipe;
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
    path = "/favorites/{favorite_id}",
    tag = "favorites",
    summary = "Fetch one favorite",
    params(("favorite_id" = Uuid, Path, description = "Favorite id")),
    responses(
        (status = 200, body = SavedRecipe),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_favorite(
    Path(favorite_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<SavedRecipe>, ApiError> {
    let favorite = state.recipe_service.favorite(&identity, favorite_id).await?;
    Ok(Response::OK(favorite))
}
