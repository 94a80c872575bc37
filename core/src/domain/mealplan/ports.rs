use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    mealplan::entities::{Meal, MealPlan},
};

#[cfg_attr(test, mockall::automock)]
pub trait MealPlanRepository: Send + Sync {
    /// Fetch the user's plan for the given week start, creating it on
    /// first access. Relies on the (user, start_date) unique constraint.
    fn get_or_create_plan(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
    ) -> impl Future<Output = Result<MealPlan, CoreError>> + Send;

    /// Insert or replace the meal occupying the entry's (plan, date,
    /// slot). Returns the stored meal and whether the slot was empty.
    fn upsert_meal(&self, meal: Meal)
        -> impl Future<Output = Result<(Meal, bool), CoreError>> + Send;

    fn meals_for_range(
        &self,
        plan_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Meal>, CoreError>> + Send;

    /// All of the user's planned meals for one day, across plans.
    fn meals_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Meal>, CoreError>> + Send;

    fn get_meal(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<Meal>, CoreError>> + Send;

    fn delete_meal(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
