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
    path = "/pantry/ingredients/{ingredient_id}",
    tag = "pantry",
    summary = "Remove a pantry ingredient",
    params(("ingredient_id" = Uuid, Path, description = "Ingredient id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_ingredient(
    Path(ingredient_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<()>, ApiError> {
    state.pantry_service.delete(&identity, ingredient_id).await?;
    Ok(Response::NoContent)
}
