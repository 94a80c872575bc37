use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        mealplan::entities::MealSlot,
        nutrition::{entities::LoggedMeal, ports::LoggedMealRepository},
    },
    entity::logged_meals::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresLoggedMealRepository {
    pub db: DatabaseConnection,
}

impl PostgresLoggedMealRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LoggedMealRepository for PostgresLoggedMealRepository {
    async fn create(&self, meal: LoggedMeal) -> Result<LoggedMeal, CoreError> {
        let active_model = ActiveModel {
            id: Set(meal.id),
            user_id: Set(meal.user_id),
            date: Set(meal.date),
            slot: Set(meal.slot.as_str().to_string()),
            title: Set(meal.title.clone()),
            source_recipe_id: Set(meal.source_recipe_id.clone()),
            calories: Set(meal.calories),
            protein_g: Set(meal.protein_g),
            carbs_g: Set(meal.carbs_g),
            fat_g: Set(meal.fat_g),
            fiber_g: Set(meal.fiber_g),
            sugar_g: Set(meal.sugar_g),
            quantity: Set(meal.quantity),
            created_at: Set(meal.created_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to log meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(LoggedMeal::from(created))
    }

    async fn list_for_day(
        &self,
        user_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<LoggedMeal>, CoreError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Date.eq(day))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list logged meals: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(LoggedMeal::from).collect())
    }

    async fn exists_for_slot(
        &self,
        user_id: Uuid,
        day: NaiveDate,
        slot: MealSlot,
        source_recipe_id: String,
    ) -> Result<bool, CoreError> {
        let count = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Date.eq(day))
            .filter(Column::Slot.eq(slot.as_str()))
            .filter(Column::SourceRecipeId.eq(source_recipe_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to check logged meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(count > 0)
    }

    async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<LoggedMeal>, CoreError> {
        let model = Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get logged meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(LoggedMeal::from))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete logged meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
