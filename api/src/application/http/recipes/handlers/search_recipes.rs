use axum::{extract::State, Json};
use smartpantry_core::domain::recipes::value_objects::{SearchInput, SearchOutcome};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recipes::validators::SearchRecipesValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    session::SessionKey,
};

#[utoipa::path(
    post,
    path = "/recipes/search",
    tag = "recipes",
    summary = "Search recipes from pantry items",
    description = "Runs the AI and web providers over the selected pantry items and \
caches the results under the caller's session. Provider failures surface as notices.",
    request_body = SearchRecipesValidator,
    responses(
        (status = 200, body = SearchOutcome),
        (status = 400, description = "Empty pantry or invalid selection")
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
    Json(payload): Json<SearchRecipesValidator>,
) -> Result<Response<SearchOutcome>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let pantry = state.pantry_service.list(&identity).await?;
    let pantry_names: Vec<String> = if payload.ingredient_ids.is_empty() {
        pantry.into_iter().map(|i| i.name).collect()
    } else {
        pantry
            .into_iter()
            .filter(|i| payload.ingredient_ids.contains(&i.id))
            .map(|i| i.name)
            .collect()
    };

    let outcome = state
        .recipe_service
        .search(SearchInput {
            session_id,
            pantry_names,
            kind: payload.kind,
        })
        .await?;

    Ok(Response::OK(outcome))
}
