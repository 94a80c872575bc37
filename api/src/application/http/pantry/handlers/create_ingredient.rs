use axum::{extract::State, Json};
use smartpantry_core::domain::pantry::{
    entities::Ingredient, value_objects::AddIngredientInput,
};
use validator::Validate;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        pantry::validators::CreateIngredientValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/pantry/ingredients",
    tag = "pantry",
    summary = "Add a pantry ingredient",
    request_body = CreateIngredientValidator,
    responses(
        (status = 201, body = Ingredient),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Ingredient already exists")
    )
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    Json(payload): Json<CreateIngredientValidator>,
) -> Result<Response<Ingredient>, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;

    let ingredient = state
        .pantry_service
        .add(
            &identity,
            AddIngredientInput {
                name: payload.name,
                quantity: payload.quantity,
                unit: payload.unit,
            },
        )
        .await?;

    Ok(Response::Created(ingredient))
}
