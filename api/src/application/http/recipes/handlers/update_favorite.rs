use axum::{
    extract::{Path, State},
    Json,
};
use smartpantry_core::domain::recipes::{
    entities::SavedRecipe, value_objects::UpdateFavoriteInput,
};
use uuid::Uuid;
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recipes::validators::UpdateFavoriteValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/favorites/{favorite_id}",
    tag = "favorites",
    summary = "Edit a favorite",
    description = "Absent fields are left unchanged.",
    params(("favorite_id" = Uuid, Path, description = "Favorite id")),
    request_body = UpdateFavoriteValidator,
    responses(
        (status = 200, body = SavedRecipe),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_favorite(
    Path(favorite_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<UpdateFavoriteValidator>,
) -> Result<Response<SavedRecipe>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let favorite = state
        .recipe_service
        .update_favorite(
            &identity,
            favorite_id,
            UpdateFavoriteInput {
                title: payload.title,
                image_url: payload.image_url,
                ingredients: payload.ingredients,
                steps: payload.steps,
            },
        )
        .await?;

    Ok(Response::OK(favorite))
}
