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
    path = "/nutrition/logs/{log_id}",
    tag = "nutrition",
    summary = "Delete a logged meal",
    params(("log_id" = Uuid, Path, description = "Logged meal id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_log(
    Path(log_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<()>, ApiError> {
    state.nutrition_service.delete_log(&identity, log_id).await?;
    Ok(Response::NoContent)
}
