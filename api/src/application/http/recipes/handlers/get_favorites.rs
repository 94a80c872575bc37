use axum::extract::State;
use smartpantry_core::domain::recipes::entities::SavedRecipe;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/favorites",
    tag = "favorites",
    summary = "List favorites, newest first",
    responses((status = 200, body = Vec<SavedRecipe>))
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Vec<SavedRecipe>>, ApiError> {
    let favorites = state.recipe_service.favorites(&identity).await?;
    Ok(Response::OK(favorites))
}
