use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use smartpantry_core::domain::user::{ports::UserRepository, value_objects::Identity};
use tracing::error;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Resolves `Authorization: Bearer <api token>` to an [`Identity`] and
/// stores it in request extensions. Requests without a valid token are
/// rejected before any handler runs.
pub async fn auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    let user = state
        .user_repository
        .get_by_api_token(token)
        .await
        .map_err(|e| {
            error!("Failed to resolve api token: {}", e);
            ApiError::InternalServerError("failed to resolve api token".to_string())
        })?
        .ok_or_else(|| ApiError::Unauthorized("invalid api token".to_string()))?;

    req.extensions_mut().insert(Identity {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}

/// Extractor for the identity placed by the `auth` middleware.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}
