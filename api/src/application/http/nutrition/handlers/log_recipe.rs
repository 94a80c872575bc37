use axum::{
    extract::{Path, State},
    Json,
};
use smartpantry_core::domain::{
    nutrition::{entities::LoggedMeal, value_objects::LogRecipeInput},
    recipes::entities::RecipeSource,
};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        nutrition::validators::LogRecipeValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    session::SessionKey,
};

#[utoipa::path(
    post,
    path = "/nutrition/log/{source}/{id}",
    tag = "nutrition",
    summary = "Log a recipe from the results",
    params(
        ("source" = String, Path, description = "Result source, `ai` or `web`"),
        ("id" = String, Path, description = "Recipe id within the source")
    ),
    request_body = LogRecipeValidator,
    responses(
        (status = 201, body = LoggedMeal),
        (status = 400, description = "Unknown source or invalid input"),
        (status = 404, description = "Recipe not in the session's results")
    )
)]
pub async fn log_recipe(
    Path((source, id)): Path<(String, String)>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
    Json(payload): Json<LogRecipeValidator>,
) -> Result<Response<LoggedMeal>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let source = RecipeSource::parse(&source)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown recipe source '{source}'")))?;

    let meal = state
        .nutrition_service
        .log_recipe(
            &identity,
            &session_id,
            source,
            &id,
            LogRecipeInput {
                slot: payload.slot,
                quantity: payload.quantity,
                calories: payload.calories,
                protein_g: payload.protein_g,
                carbs_g: payload.carbs_g,
                fat_g: payload.fat_g,
            },
        )
        .await?;

    Ok(Response::Created(meal))
}
