use axum::{extract::State, Json};
use smartpantry_core::domain::nutrition::{
    entities::NutritionTarget, value_objects::TargetInput,
};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        nutrition::validators::TargetValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    put,
    path = "/nutrition/target",
    tag = "nutrition",
    summary = "Set daily targets",
    request_body = TargetValidator,
    responses(
        (status = 200, body = NutritionTarget),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn put_target(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<TargetValidator>,
) -> Result<Response<NutritionTarget>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let target = state
        .nutrition_service
        .upsert_target(
            &identity,
            TargetInput {
                calories: payload.calories,
                protein_g: payload.protein_g,
                carbs_g: payload.carbs_g,
                fat_g: payload.fat_g,
                fiber_g: payload.fiber_g,
                sugar_g: payload.sugar_g,
                diet_type: payload.diet_type,
            },
        )
        .await?;

    Ok(Response::OK(target))
}
