use axum::extract::{Path, State};
use smartpantry_core::domain::recipes::entities::{RecipeRecord, RecipeSource};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::SessionKey,
};

#[utoipa::path(
    get,
    path = "/recipes/{source}/{id}",
    tag = "recipes",
    summary = "Recipe detail",
    description = "Returns the cached record enriched with ingredients, steps and \
pantry match flags. Web records missing steps are completed from the provider.",
    params(
        ("source" = String, Path, description = "Result source, `ai` or `web`"),
        ("id" = String, Path, description = "Recipe id within the source")
    ),
    responses(
        (status = 200, body = RecipeRecord),
        (status = 400, description = "Unknown source"),
        (status = 404, description = "Recipe not in the session's results")
    )
)]
pub async fn get_recipe_detail(
    Path((source, id)): Path<(String, String)>,
    State(state): State<AppState>,
    RequiredIdentity(_identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
) -> Result<Response<RecipeRecord>, ApiError> {
    let source = RecipeSource::parse(&source)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown recipe source '{source}'")))?;

    let record = state.recipe_service.detail(&session_id, source, &id).await?;
    Ok(Response::OK(record))
}
