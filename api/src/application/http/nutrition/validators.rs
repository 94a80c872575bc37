use serde::Deserialize;
use smartpantry_core::domain::{mealplan::entities::MealSlot, nutrition::entities::DietType};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TargetValidator {
    #[validate(range(min = 1, max = 20000, message = "calories must be 1-20000"))]
    pub calories: i32,
    #[validate(range(min = 0, max = 2000, message = "protein_g must be 0-2000"))]
    pub protein_g: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "carbs_g must be 0-2000"))]
    pub carbs_g: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "fat_g must be 0-2000"))]
    pub fat_g: Option<i32>,
    #[validate(range(min = 0, max = 500, message = "fiber_g must be 0-500"))]
    pub fiber_g: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "sugar_g must be 0-2000"))]
    pub sugar_g: Option<i32>,
    pub diet_type: Option<DietType>,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuickLogValidator {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    pub slot: MealSlot,
    #[validate(range(min = 0, max = 20000, message = "calories must be 0-20000"))]
    pub calories: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 2000, message = "protein_g must be 0-2000"))]
    pub protein_g: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 2000, message = "carbs_g must be 0-2000"))]
    pub carbs_g: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 2000, message = "fat_g must be 0-2000"))]
    pub fat_g: i32,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0.1, max = 100.0, message = "quantity must be 0.1-100"))]
    pub quantity: f64,
}

/// Macros are optional; absent values fall back to the cached record and
/// then to a provider prefill.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LogRecipeValidator {
    pub slot: MealSlot,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0.1, max = 100.0, message = "quantity must be 0.1-100"))]
    pub quantity: f64,
    #[validate(range(min = 0, max = 20000, message = "calories must be 0-20000"))]
    pub calories: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "protein_g must be 0-2000"))]
    pub protein_g: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "carbs_g must be 0-2000"))]
    pub carbs_g: Option<i32>,
    #[validate(range(min = 0, max = 2000, message = "fat_g must be 0-2000"))]
    pub fat_g: Option<i32>,
}
