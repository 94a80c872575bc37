use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Meal slot within a day. One plan entry per (plan, date, slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealSlot::Breakfast),
            "lunch" => Some(MealSlot::Lunch),
            "dinner" => Some(MealSlot::Dinner),
            "snack" => Some(MealSlot::Snack),
            _ => None,
        }
    }
}

/// Monday of the week containing `day`.
pub fn week_start_monday(day: NaiveDate) -> NaiveDate {
    day - Days::new(day.weekday().num_days_from_monday() as u64)
}

/// A weekly plan, one per (user, week). `start_date` is always a Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn new(user_id: Uuid, start_date: NaiveDate) -> Self {
        let (now, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            start_date,
            created_at: now,
        }
    }
}

/// One scheduled meal. Either links a saved recipe or carries a free
/// title (quick-logged meals mirrored into the plan). Macros are
/// snapshotted here so plan-to-log syncing needs no joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meal {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_id: Option<Uuid>,
    pub title: String,
    pub notes: String,
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub created_at: DateTime<Utc>,
}

impl Meal {
    pub fn new(plan_id: Uuid, date: NaiveDate, slot: MealSlot, title: String) -> Self {
        let (now, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            plan_id,
            date,
            slot,
            recipe_id: None,
            title,
            notes: String::new(),
            calories: 0,
            protein_g: 0,
            carbs_g: 0,
            fat_g: 0,
            created_at: now,
        }
    }

    /// Stable id used to de-duplicate plan-to-log syncing.
    pub fn source_recipe_id(&self) -> String {
        self.recipe_id.map(|id| id.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_is_monday() {
        // 2025-06-11 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        assert_eq!(week_start_monday(wednesday), monday);
        // A Monday maps to itself
        assert_eq!(week_start_monday(monday), monday);
        // Sunday belongs to the week that started six days earlier
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(week_start_monday(sunday), monday);
    }

    #[test]
    fn slot_parsing_is_case_insensitive() {
        assert_eq!(MealSlot::parse(" Dinner "), Some(MealSlot::Dinner));
        assert_eq!(MealSlot::parse("brunch"), None);
    }
}
