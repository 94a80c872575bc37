use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::mealplan::entities::{Meal, MealPlan, MealSlot};

#[derive(Debug, Clone)]
pub struct AddMealInput {
    pub recipe_id: Uuid,
    pub date: NaiveDate,
    pub slot: MealSlot,
}

/// One cell of the week grid; empty slots carry no meal.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekCell {
    pub slot: MealSlot,
    pub meal: Option<Meal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekRow {
    pub date: NaiveDate,
    pub cells: Vec<WeekCell>,
}

/// Seven days by four slots, plus navigation anchors.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekView {
    pub plan: MealPlan,
    pub week_start: NaiveDate,
    pub prev_week: NaiveDate,
    pub next_week: NaiveDate,
    pub rows: Vec<WeekRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOutcome {
    Created,
    Replaced,
}
