use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, mealplan::entities::MealSlot};

pub const DEFAULT_CALORIE_TARGET: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    HighProtein,
    Balanced,
    Keto,
    Vegetarian,
    Vegan,
}

impl DietType {
    pub fn as_str(&self) -> &str {
        match self {
            DietType::HighProtein => "high_protein",
            DietType::Balanced => "balanced",
            DietType::Keto => "keto",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high_protein" => Some(DietType::HighProtein),
            "balanced" => Some(DietType::Balanced),
            "keto" => Some(DietType::Keto),
            "vegetarian" => Some(DietType::Vegetarian),
            "vegan" => Some(DietType::Vegan),
            _ => None,
        }
    }
}

/// Per-user daily targets. One row per user; absent macros mean "no
/// target set" and render as zero-percent bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionTarget {
    pub user_id: Uuid,
    pub calories: i32,
    pub protein_g: Option<i32>,
    pub carbs_g: Option<i32>,
    pub fat_g: Option<i32>,
    pub fiber_g: Option<i32>,
    pub sugar_g: Option<i32>,
    pub diet_type: Option<DietType>,
    pub updated_at: DateTime<Utc>,
}

impl NutritionTarget {
    pub fn default_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            calories: DEFAULT_CALORIE_TARGET,
            protein_g: None,
            carbs_g: None,
            fat_g: None,
            fiber_g: None,
            sugar_g: None,
            diet_type: None,
            updated_at: Utc::now(),
        }
    }
}

/// One consumed meal. Macros are per serving; `quantity` is the serving
/// multiplier and is already applied by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoggedMeal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub title: String,
    /// External recipe id this entry came from; empty for custom meals.
    pub source_recipe_id: String,
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub fiber_g: i32,
    pub sugar_g: i32,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

impl LoggedMeal {
    pub fn new(user_id: Uuid, date: NaiveDate, slot: MealSlot, title: String) -> Self {
        let (now, timestamp) = generate_timestamp();
        let mut title = title;
        title.truncate(200);
        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            date,
            slot,
            title,
            source_recipe_id: String::new(),
            calories: 0,
            protein_g: 0,
            carbs_g: 0,
            fat_g: 0,
            fiber_g: 0,
            sugar_g: 0,
            quantity: 1.0,
            created_at: now,
        }
    }
}
