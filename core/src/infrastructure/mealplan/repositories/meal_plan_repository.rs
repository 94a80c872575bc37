use chrono::NaiveDate;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        mealplan::{
            entities::{Meal, MealPlan},
            ports::MealPlanRepository,
        },
    },
    entity::{
        meal_plans::{
            ActiveModel as PlanActiveModel, Column as PlanColumn, Entity as PlanEntity,
        },
        meals::{ActiveModel, Column, Entity},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresMealPlanRepository {
    pub db: DatabaseConnection,
}

impl PostgresMealPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn plan_ids_for_user(&self, user_id: Uuid) -> Result<Vec<Uuid>, CoreError> {
        let plans = PlanEntity::find()
            .filter(PlanColumn::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list meal plans: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(plans.into_iter().map(|p| p.id).collect())
    }

    /// Loads a meal and proves ownership through its plan.
    async fn owned_meal(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<crate::entity::meals::Model>, CoreError> {
        let meal = Entity::find()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get meal: {}", e);
                CoreError::InternalServerError
            })?;

        let Some(meal) = meal else {
            return Ok(None);
        };

        let plan = PlanEntity::find()
            .filter(PlanColumn::Id.eq(meal.plan_id))
            .filter(PlanColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to check meal ownership: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(plan.map(|_| meal))
    }
}

impl MealPlanRepository for PostgresMealPlanRepository {
    async fn get_or_create_plan(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
    ) -> Result<MealPlan, CoreError> {
        let existing = PlanEntity::find()
            .filter(PlanColumn::UserId.eq(user_id))
            .filter(PlanColumn::StartDate.eq(start_date))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get meal plan: {}", e);
                CoreError::InternalServerError
            })?;

        if let Some(model) = existing {
            return Ok(MealPlan::from(model));
        }

        let plan = MealPlan::new(user_id, start_date);
        let active_model = PlanActiveModel {
            id: Set(plan.id),
            user_id: Set(plan.user_id),
            start_date: Set(plan.start_date),
            created_at: Set(plan.created_at.fixed_offset()),
        };

        match PlanEntity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
        {
            Ok(created) => Ok(MealPlan::from(created)),
            // Lost the race with a concurrent first access; the winner's
            // row is the plan.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let model = PlanEntity::find()
                    .filter(PlanColumn::UserId.eq(user_id))
                    .filter(PlanColumn::StartDate.eq(start_date))
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        error!("Failed to re-read meal plan: {}", e);
                        CoreError::InternalServerError
                    })?;
                model.map(MealPlan::from).ok_or(CoreError::InternalServerError)
            }
            Err(e) => {
                error!("Failed to create meal plan: {}", e);
                Err(CoreError::InternalServerError)
            }
        }
    }

    async fn upsert_meal(&self, meal: Meal) -> Result<(Meal, bool), CoreError> {
        let existing = Entity::find()
            .filter(Column::PlanId.eq(meal.plan_id))
            .filter(Column::Date.eq(meal.date))
            .filter(Column::Slot.eq(meal.slot.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up meal slot: {}", e);
                CoreError::InternalServerError
            })?;

        match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.recipe_id = Set(meal.recipe_id);
                active.title = Set(meal.title.clone());
                active.notes = Set(meal.notes.clone());
                active.calories = Set(meal.calories);
                active.protein_g = Set(meal.protein_g);
                active.carbs_g = Set(meal.carbs_g);
                active.fat_g = Set(meal.fat_g);

                let updated = Entity::update(active).exec(&self.db).await.map_err(|e| {
                    error!("Failed to replace meal: {}", e);
                    CoreError::InternalServerError
                })?;
                Ok((Meal::from(updated), false))
            }
            None => {
                let active_model = ActiveModel {
                    id: Set(meal.id),
                    plan_id: Set(meal.plan_id),
                    date: Set(meal.date),
                    slot: Set(meal.slot.as_str().to_string()),
                    recipe_id: Set(meal.recipe_id),
                    title: Set(meal.title.clone()),
                    notes: Set(meal.notes.clone()),
                    calories: Set(meal.calories),
                    protein_g: Set(meal.protein_g),
                    carbs_g: Set(meal.carbs_g),
                    fat_g: Set(meal.fat_g),
                    created_at: Set(meal.created_at.fixed_offset()),
                };

                let created = Entity::insert(active_model)
                    .exec_with_returning(&self.db)
                    .await
                    .map_err(|e| {
                        error!("Failed to schedule meal: {}", e);
                        CoreError::InternalServerError
                    })?;
                Ok((Meal::from(created), true))
            }
        }
    }

    async fn meals_for_range(
        &self,
        plan_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Meal>, CoreError> {
        let models = Entity::find()
            .filter(Column::PlanId.eq(plan_id))
            .filter(Column::Date.gte(from))
            .filter(Column::Date.lte(to))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list meals: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(Meal::from).collect())
    }

    async fn meals_for_day(&self, user_id: Uuid, day: NaiveDate) -> Result<Vec<Meal>, CoreError> {
        let plan_ids = self.plan_ids_for_user(user_id).await?;
        if plan_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Entity::find()
            .filter(Column::PlanId.is_in(plan_ids))
            .filter(Column::Date.eq(day))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list meals for day: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(Meal::from).collect())
    }

    async fn get_meal(&self, id: Uuid, user_id: Uuid) -> Result<Option<Meal>, CoreError> {
        Ok(self.owned_meal(id, user_id).await?.map(Meal::from))
    }

    async fn delete_meal(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        let Some(meal) = self.owned_meal(id, user_id).await? else {
            return Ok(());
        };

        Entity::delete_many()
            .filter(Column::Id.eq(meal.id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete meal: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
