use axum::extract::{Path, State};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/favorites/{favorite_id}",
    tag = "favorites",
    summary = "Delete a favorite",
    params(("favorite_id" = Uuid, Path, description = "Favorite id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_favorite(
    Path(favorite_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<()>, ApiError> {
    state
        .recipe_service
        .delete_favorite(&identity, favorite_id)
        .await?;
    Ok(Response::NoContent)
}
