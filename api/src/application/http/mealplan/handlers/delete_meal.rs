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
    path = "/mealplan/meals/{meal_id}",
    tag = "mealplan",
    summary = "Remove a planned meal",
    params(("meal_id" = Uuid, Path, description = "Planned meal id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_meal(
    Path(meal_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<()>, ApiError> {
    state.meal_plan_service.remove(&identity, meal_id).await?;
    Ok(Response::NoContent)
}
