use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        recipes::{
            entities::{RecipeSource, SavedRecipe},
            ports::SavedRecipeRepository,
        },
    },
    entity::saved_recipes::{ActiveModel, Column, Entity},
    infrastructure::recipes::mappers::json_string_list,
};

#[derive(Debug, Clone)]
pub struct PostgresSavedRecipeRepository {
    pub db: DatabaseConnection,
}

impl PostgresSavedRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(recipe: &SavedRecipe) -> ActiveModel {
    ActiveModel {
        id: Set(recipe.id),
        user_id: Set(recipe.user_id),
        source: Set(recipe.source.as_str().to_string()),
        external_id: Set(recipe.external_id.clone()),
        title: Set(recipe.title.clone()),
        image_url: Set(recipe.image_url.clone()),
        ingredients: Set(json_string_list(&recipe.ingredients)),
        steps: Set(json_string_list(&recipe.steps)),
        nutrition: Set(recipe.nutrition.clone()),
        created_at: Set(recipe.created_at.fixed_offset()),
    }
}

impl SavedRecipeRepository for PostgresSavedRecipeRepository {
    async fn create(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
        let created = Entity::insert(to_active_model(&recipe))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    CoreError::AlreadyExists("saved recipe".to_string())
                }
                _ => {
                    error!("Failed to save recipe: {}", e);
                    CoreError::InternalServerError
                }
            })?;

        Ok(SavedRecipe::from(created))
    }

    async fn get_by_key(
        &self,
        user_id: Uuid,
        source: RecipeSource,
        external_id: String,
    ) -> Result<Option<SavedRecipe>, CoreError> {
        let model = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Source.eq(source.as_str()))
            .filter(Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get saved recipe by key: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(SavedRecipe::from))
    }

    async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<SavedRecipe>, CoreError> {
        let model = Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(SavedRecipe::from))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SavedRecipe>, CoreError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list saved recipes: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(SavedRecipe::from).collect())
    }

    async fn update(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
        let updated = Entity::update(to_active_model(&recipe))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(SavedRecipe::from(updated))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
