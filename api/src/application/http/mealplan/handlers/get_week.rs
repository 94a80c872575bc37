use axum::extract::{Query, State};
use smartpantry_core::domain::mealplan::value_objects::WeekView;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        mealplan::validators::WeekQuery,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/mealplan",
    tag = "mealplan",
    summary = "Week grid",
    description = "Seven days by four slots for the week containing `week`, \
defaulting to the current week.",
    params(WeekQuery),
    responses((status = 200, body = WeekView))
)]
pub async fn get_week(
    Query(query): Query<WeekQuery>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<WeekView>, ApiError> {
    let view = state.meal_plan_service.week(&identity, query.week).await?;
    Ok(Response::OK(view))
}
