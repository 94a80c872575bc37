use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIngredientValidator {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "quantity must be at most 32 characters"))]
    pub quantity: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "unit must be at most 32 characters"))]
    pub unit: String,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct ReviewRowValidator {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReviewValidator {
    #[validate(length(min = 1, max = 60, message = "between 1 and 60 rows expected"), nested)]
    pub rows: Vec<ReviewRowValidator>,
}
