use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    mealplan::entities::MealSlot,
    nutrition::entities::{LoggedMeal, NutritionTarget},
};

#[cfg_attr(test, mockall::automock)]
pub trait NutritionTargetRepository: Send + Sync {
    fn get(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<NutritionTarget>, CoreError>> + Send;

    fn upsert(
        &self,
        target: NutritionTarget,
    ) -> impl Future<Output = Result<NutritionTarget, CoreError>> + Send;

    fn delete(&self, user_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait LoggedMealRepository: Send + Sync {
    fn create(
        &self,
        meal: LoggedMeal,
    ) -> impl Future<Output = Result<LoggedMeal, CoreError>> + Send;

    fn list_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LoggedMeal>, CoreError>> + Send;

    /// Plan-to-log sync de-duplication key.
    fn exists_for_slot(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        slot: MealSlot,
        source_recipe_id: String,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<LoggedMeal>, CoreError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
