use axum::{extract::State, Json};
use serde::Serialize;
use smartpantry_core::domain::mealplan::{
    entities::Meal,
    value_objects::{AddMealInput, ScheduleOutcome},
};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        mealplan::validators::ScheduleMealValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleMealResponse {
    pub meal: Meal,
    pub status: ScheduleOutcome,
}

#[utoipa::path(
    post,
    path = "/mealplan/meals",
    tag = "mealplan",
    summary = "Put a favorite on the plan",
    description = "Scheduling into an occupied slot replaces the existing entry.",
    request_body = ScheduleMealValidator,
    responses(
        (status = 201, body = ScheduleMealResponse),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn schedule_meal(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<ScheduleMealValidator>,
) -> Result<Response<ScheduleMealResponse>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let (meal, status) = state
        .meal_plan_service
        .schedule(
            &identity,
            AddMealInput {
                recipe_id: payload.recipe_id,
                date: payload.date,
                slot: payload.slot,
            },
        )
        .await?;

    Ok(Response::Created(ScheduleMealResponse { meal, status }))
}
