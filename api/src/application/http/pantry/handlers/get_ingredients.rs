use axum::extract::State;
use smartpantry_core::domain::pantry::entities::Ingredient;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/pantry/ingredients",
    tag = "pantry",
    summary = "List pantry ingredients",
    responses(
        (status = 200, body = Vec<Ingredient>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_ingredients(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Vec<Ingredient>>, ApiError> {
    let ingredients = state.pantry_service.list(&identity).await?;
    Ok(Response::OK(ingredients))
}
