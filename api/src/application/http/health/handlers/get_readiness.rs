use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub database: &'static str,
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Round-trips a query to the database.",
    responses(
        (status = 200, body = ReadinessResponse),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn get_readiness(
    State(state): State<AppState>,
) -> Result<Response<ReadinessResponse>, ApiError> {
    state.health_service.readiness().await?;
    Ok(Response::OK(ReadinessResponse { database: "ok" }))
}
