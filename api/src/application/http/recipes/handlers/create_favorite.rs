use axum::{extract::State, Json};
use smartpantry_core::domain::recipes::{
    entities::SavedRecipe, value_objects::CreateFavoriteInput,
};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recipes::validators::CreateFavoriteValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/favorites",
    tag = "favorites",
    summary = "Create a favorite by hand",
    description = "For recipes typed in directly rather than saved from search results.",
    request_body = CreateFavoriteValidator,
    responses(
        (status = 201, body = SavedRecipe),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "A favorite with this source and external id already exists")
    )
)]
pub async fn create_favorite(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<CreateFavoriteValidator>,
) -> Result<Response<SavedRecipe>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let favorite = state
        .recipe_service
        .create_favorite(
            &identity,
            CreateFavoriteInput {
                title: payload.title,
                source: payload.source,
                external_id: payload.external_id,
                image_url: payload.image_url,
                ingredients: payload.ingredients,
                steps: payload.steps,
                nutrition: payload.nutrition,
            },
        )
        .await?;

    Ok(Response::Created(favorite))
}
