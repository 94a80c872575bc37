use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user::{entities::User, ports::UserRepository},
    },
    entity::users::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_by_api_token(&self, token: String) -> Result<Option<User>, CoreError> {
        let model = Entity::find()
            .filter(Column::ApiToken.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to look up user by token: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(User::from))
    }
}
