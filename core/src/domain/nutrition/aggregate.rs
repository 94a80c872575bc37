//! Daily intake aggregation against the user's targets.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::nutrition::entities::{LoggedMeal, NutritionTarget};

/// Intake summed over one day, with progress percentages against the
/// target. Percentages are clamped to 0..=200 for display; a missing or
/// zero target always reads as 0%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyTotals {
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub fiber_g: i32,
    pub sugar_g: i32,

    pub calories_pct: i32,
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fat_pct: i32,
}

fn pct(n: i32, d: i32) -> i32 {
    if d <= 0 {
        return 0;
    }
    ((n as f64 / d as f64) * 100.0).round().clamp(0.0, 200.0) as i32
}

fn scaled(value: i32, quantity: f64) -> i32 {
    (value as f64 * quantity).round() as i32
}

pub fn compute_daily_totals(meals: &[LoggedMeal], target: &NutritionTarget) -> DailyTotals {
    let mut totals = DailyTotals::default();

    for meal in meals {
        totals.calories += scaled(meal.calories, meal.quantity);
        totals.protein_g += scaled(meal.protein_g, meal.quantity);
        totals.carbs_g += scaled(meal.carbs_g, meal.quantity);
        totals.fat_g += scaled(meal.fat_g, meal.quantity);
        totals.fiber_g += scaled(meal.fiber_g, meal.quantity);
        totals.sugar_g += scaled(meal.sugar_g, meal.quantity);
    }

    totals.calories_pct = pct(totals.calories, target.calories);
    totals.protein_pct = pct(totals.protein_g, target.protein_g.unwrap_or(0));
    totals.carbs_pct = pct(totals.carbs_g, target.carbs_g.unwrap_or(0));
    totals.fat_pct = pct(totals.fat_g, target.fat_g.unwrap_or(0));
    totals
}
