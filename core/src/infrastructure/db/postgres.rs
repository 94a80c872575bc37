use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

use crate::domain::common::DatabaseConfig;

/// Connect, run pending migrations, and hand the pool to sea-orm.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.url())
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations are up to date");

    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}
