use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use smartpantry_core::domain::user::value_objects::Identity;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Cache key for search results: the `x-session-id` header when the
/// client sends one, otherwise the authenticated user id so results
/// survive a missing header.
pub struct SessionKey(pub String);

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        if let Some(session_id) = parts
            .headers
            .get("x-session-id")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return Ok(SessionKey(session_id.to_string()));
        }

        parts
            .extensions
            .get::<Identity>()
            .map(|identity| SessionKey(identity.user_id.to_string()))
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}
