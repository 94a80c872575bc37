use chrono::NaiveDate;
use serde::Deserialize;
use smartpantry_core::domain::mealplan::entities::MealSlot;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScheduleMealValidator {
    /// Favorite to put on the plan.
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub slot: MealSlot,
}

/// `?week=YYYY-MM-DD` selects the week containing that date; absent
/// means the current week.
#[derive(Debug, Deserialize, IntoParams)]
pub struct WeekQuery {
    pub week: Option<NaiveDate>,
}
