use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        nutrition::{entities::NutritionTarget, ports::NutritionTargetRepository},
    },
    entity::nutrition_targets::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresNutritionTargetRepository {
    pub db: DatabaseConnection,
}

impl PostgresNutritionTargetRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(target: &NutritionTarget) -> ActiveModel {
    ActiveModel {
        user_id: Set(target.user_id),
        calories: Set(target.calories),
        protein_g: Set(target.protein_g),
        carbs_g: Set(target.carbs_g),
        fat_g: Set(target.fat_g),
        fiber_g: Set(target.fiber_g),
        sugar_g: Set(target.sugar_g),
        diet_type: Set(target.diet_type.map(|d| d.as_str().to_string())),
        updated_at: Set(target.updated_at.fixed_offset()),
    }
}

impl NutritionTargetRepository for PostgresNutritionTargetRepository {
    async fn get(&self, user_id: Uuid) -> Result<Option<NutritionTarget>, CoreError> {
        let model = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get nutrition target: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(NutritionTarget::from))
    }

    async fn upsert(&self, target: NutritionTarget) -> Result<NutritionTarget, CoreError> {
        let existing = self.get(target.user_id).await?;

        if existing.is_some() {
            let updated = Entity::update(to_active_model(&target))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    error!("Failed to update nutrition target: {}", e);
                    CoreError::InternalServerError
                })?;
            return Ok(NutritionTarget::from(updated));
        }

        let created = Entity::insert(to_active_model(&target))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create nutrition target: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(NutritionTarget::from(created))
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete nutrition target: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
