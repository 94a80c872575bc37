use axum::extract::State;
use smartpantry_core::domain::nutrition::entities::NutritionTarget;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/nutrition/target",
    tag = "nutrition",
    summary = "Reset targets to defaults",
    responses((status = 200, body = NutritionTarget))
)]
pub async fn delete_target(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<NutritionTarget>, ApiError> {
    let target = state.nutrition_service.reset_target(&identity).await?;
    Ok(Response::OK(target))
}
