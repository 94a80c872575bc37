use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone)]
pub struct HealthCheckService {
    db: DatabaseConnection,
}

impl HealthCheckService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Round-trips a trivial query so the readiness probe reflects actual
    /// database connectivity, not just process liveness.
    pub async fn readiness(&self) -> Result<(), CoreError> {
        self.db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT 1",
            ))
            .await
            .map_err(|e| {
                tracing::error!("health check query failed: {}", e);
                CoreError::InternalServerError
            })?;
        Ok(())
    }
}
