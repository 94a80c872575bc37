use axum::extract::{Path, State};
use serde::Serialize;
use smartpantry_core::domain::recipes::{
    entities::RecipeSource,
    value_objects::SaveOutcome,
};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::SessionKey,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveRecipeResponse {
    pub status: SaveOutcome,
}

#[utoipa::path(
    post,
    path = "/recipes/{source}/{id}/save",
    tag = "recipes",
    summary = "Save a result as a favorite",
    params(
        ("source" = String, Path, description = "Result source, `ai` or `web`"),
        ("id" = String, Path, description = "Recipe id within the source")
    ),
    responses(
        (status = 201, body = SaveRecipeResponse),
        (status = 400, description = "Unknown source"),
        (status = 404, description = "Recipe not in the session's results")
    )
)]
pub async fn save_recipe(
    Path((source, id)): Path<(String, String)>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
) -> Result<Response<SaveRecipeResponse>, ApiError> {
    let source = RecipeSource::parse(&source)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown recipe source '{source}'")))?;

    let status = state
        .recipe_service
        .save_favorite(&identity, &session_id, source, &id)
        .await?;

    Ok(Response::Created(SaveRecipeResponse { status }))
}
