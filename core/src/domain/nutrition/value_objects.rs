use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    mealplan::entities::MealSlot,
    nutrition::{
        aggregate::DailyTotals,
        entities::{DietType, LoggedMeal, NutritionTarget},
    },
    recipes::entities::RecipeRecord,
};

#[derive(Debug, Clone)]
pub struct TargetInput {
    pub calories: i32,
    pub protein_g: Option<i32>,
    pub carbs_g: Option<i32>,
    pub fat_g: Option<i32>,
    pub fiber_g: Option<i32>,
    pub sugar_g: Option<i32>,
    pub diet_type: Option<DietType>,
}

#[derive(Debug, Clone)]
pub struct QuickLogInput {
    pub title: String,
    pub slot: MealSlot,
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub quantity: f64,
}

/// Logging a recipe from the detail page. Macros can be overridden by
/// the client; absent values fall back to the cached record and then to
/// a provider prefill.
#[derive(Debug, Clone)]
pub struct LogRecipeInput {
    pub slot: MealSlot,
    pub quantity: f64,
    pub calories: Option<i32>,
    pub protein_g: Option<i32>,
    pub carbs_g: Option<i32>,
    pub fat_g: Option<i32>,
}

/// Best-effort macro estimates pulled from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MacroPrefill {
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

/// Everything the targets page shows at once.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NutritionOverview {
    pub target: NutritionTarget,
    pub totals: DailyTotals,
    pub meals: Vec<LoggedMeal>,
    pub suggestions: Vec<RecipeRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuickLogOutcome {
    pub meal: LoggedMeal,
    /// Set when the plan slot was already taken and nothing was mirrored.
    pub plan_conflict: Option<String>,
}
