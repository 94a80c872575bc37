use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        extraction::{entities::PantryImageUpload, ports::PantryUploadRepository},
    },
    entity::pantry_image_uploads::{ActiveModel, Column, Entity},
    infrastructure::extraction::mappers::candidates_json,
};

#[derive(Debug, Clone)]
pub struct PostgresPantryUploadRepository {
    pub db: DatabaseConnection,
}

impl PostgresPantryUploadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(upload: &PantryImageUpload) -> ActiveModel {
    ActiveModel {
        id: Set(upload.id),
        user_id: Set(upload.user_id),
        object_key: Set(upload.object_key.clone()),
        content_type: Set(upload.content_type.clone()),
        status: Set(upload.status.as_str().to_string()),
        method: Set(upload.method.map(|m| m.as_str().to_string())),
        candidates: Set(candidates_json(&upload.candidates)),
        created_at: Set(upload.created_at.fixed_offset()),
    }
}

impl PantryUploadRepository for PostgresPantryUploadRepository {
    async fn create(&self, upload: PantryImageUpload) -> Result<PantryImageUpload, CoreError> {
        let created = Entity::insert(to_active_model(&upload))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create pantry upload: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(PantryImageUpload::from(created))
    }

    async fn update(&self, upload: PantryImageUpload) -> Result<PantryImageUpload, CoreError> {
        let updated = Entity::update(to_active_model(&upload))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update pantry upload: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(PantryImageUpload::from(updated))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PantryImageUpload>, CoreError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list pantry uploads: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(PantryImageUpload::from).collect())
    }

    async fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<PantryImageUpload>, CoreError> {
        let model = Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get pantry upload: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(PantryImageUpload::from))
    }
}
