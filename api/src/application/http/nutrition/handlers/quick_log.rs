use axum::{extract::State, Json};
use smartpantry_core::domain::nutrition::value_objects::{QuickLogInput, QuickLogOutcome};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        nutrition::validators::QuickLogValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/nutrition/log",
    tag = "nutrition",
    summary = "Quick-log a custom meal",
    description = "Logs today and mirrors the entry onto the meal plan when the \
slot is free; a taken slot comes back as `plan_conflict`.",
    request_body = QuickLogValidator,
    responses(
        (status = 201, body = QuickLogOutcome),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn quick_log(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<QuickLogValidator>,
) -> Result<Response<QuickLogOutcome>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let outcome = state
        .nutrition_service
        .quick_log(
            &identity,
            QuickLogInput {
                title: payload.title,
                slot: payload.slot,
                calories: payload.calories,
                protein_g: payload.protein_g,
                carbs_g: payload.carbs_g,
                fat_g: payload.fat_g,
                quantity: payload.quantity,
            },
        )
        .await?;

    Ok(Response::Created(outcome))
}
