use axum::extract::State;
use smartpantry_core::domain::nutrition::value_objects::NutritionOverview;

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
    path = "/nutrition/target",
    tag = "nutrition",
    summary = "Targets page payload",
    description = "Target, today's totals and logged meals, and gap suggestions. \
Planned meals for today are synced into the log before summing.",
    responses((status = 200, body = NutritionOverview))
)]
pub async fn get_overview(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    SessionKey(session_id): SessionKey,
) -> Result<Response<NutritionOverview>, ApiError> {
    let overview = state
        .nutrition_service
        .overview(&identity, &session_id)
        .await?;
    Ok(Response::OK(overview))
}
