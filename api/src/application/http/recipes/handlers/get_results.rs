use axum::extract::State;
use smartpantry_core::domain::session::entities::SearchResultBundle;

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
    path = "/recipes/results",
    tag = "recipes",
    summary = "Reload the session's cached results",
    responses(
        (status = 200, body = SearchResultBundle),
        (status = 404, description = "No results cached for this session")
    )
)]
pub async fn get_results(
    State(state): State<AppState>,
    RequiredIdentity(_identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
) -> Result<Response<SearchResultBundle>, ApiError> {
    let bundle = state
        .recipe_service
        .results(&session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("no search results for this session".to_string()))?;

    Ok(Response::OK(bundle))
}
