use sea_orm::{
    sea_query::{Expr, Func},
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        pantry::{
            entities::{Ingredient, DEFAULT_UNIT},
            ports::IngredientRepository,
            value_objects::MergeOutcome,
        },
    },
    entity::ingredients::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresIngredientRepository {
    pub db: DatabaseConnection,
}

impl PostgresIngredientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn name_ci_eq(name: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(Column::Name))).eq(name.trim().to_lowercase())
}

/// Quantities merge numerically when both sides parse as decimals;
/// otherwise the incoming value replaces the stored one.
fn merged_quantity(existing: &str, incoming: &str) -> String {
    match (existing.trim().parse::<f64>(), incoming.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => {
            let sum = a + b;
            if sum.fract() == 0.0 {
                format!("{}", sum as i64)
            } else {
                format!("{sum}")
            }
        }
        _ => incoming.trim().to_string(),
    }
}

impl IngredientRepository for PostgresIngredientRepository {
    async fn create(&self, ingredient: Ingredient) -> Result<Ingredient, CoreError> {
        let active_model = ActiveModel {
            id: Set(ingredient.id),
            user_id: Set(ingredient.user_id),
            name: Set(ingredient.name.clone()),
            quantity: Set(ingredient.quantity.clone()),
            unit: Set(ingredient.unit.clone()),
            created_at: Set(ingredient.created_at.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    CoreError::AlreadyExists("ingredient".to_string())
                }
                _ => {
                    error!("Failed to create ingredient: {}", e);
                    CoreError::InternalServerError
                }
            })?;

        Ok(Ingredient::from(created))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ingredient>, CoreError> {
        let models = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list ingredients: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Ingredient>, CoreError> {
        let model = Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get ingredient: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(Ingredient::from))
    }

    async fn get_by_name_ci(
        &self,
        user_id: Uuid,
        name: String,
    ) -> Result<Option<Ingredient>, CoreError> {
        let model = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(name_ci_eq(&name))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get ingredient by name: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(model.map(Ingredient::from))
    }

    async fn merge_or_create(
        &self,
        user_id: Uuid,
        name: String,
        quantity: String,
        unit: String,
    ) -> Result<MergeOutcome, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to open merge transaction: {}", e);
            CoreError::InternalServerError
        })?;

        // Row lock so two review submissions racing on the same name
        // serialize instead of losing an update.
        let existing = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(name_ci_eq(&name))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| {
                error!("Failed to look up ingredient for merge: {}", e);
                CoreError::InternalServerError
            })?;

        let outcome = match existing {
            Some(model) => {
                let quantity = merged_quantity(&model.quantity, &quantity);
                let unit = if unit.trim().is_empty() {
                    model.unit.clone()
                } else {
                    unit
                };
                let mut active: ActiveModel = model.into();
                active.quantity = Set(quantity);
                active.unit = Set(unit);
                Entity::update(active).exec(&txn).await.map_err(|e| {
                    error!("Failed to merge ingredient: {}", e);
                    CoreError::InternalServerError
                })?;
                MergeOutcome::Updated
            }
            None => {
                let unit = if unit.trim().is_empty() {
                    DEFAULT_UNIT.to_string()
                } else {
                    unit
                };
                let ingredient =
                    Ingredient::new(user_id, name.trim().to_string(), quantity, unit);
                let active_model = ActiveModel {
                    id: Set(ingredient.id),
                    user_id: Set(ingredient.user_id),
                    name: Set(ingredient.name),
                    quantity: Set(ingredient.quantity),
                    unit: Set(ingredient.unit),
                    created_at: Set(ingredient.created_at.fixed_offset()),
                };
                Entity::insert(active_model).exec(&txn).await.map_err(|e| {
                    error!("Failed to create ingredient during merge: {}", e);
                    CoreError::InternalServerError
                })?;
                MergeOutcome::Added
            }
        };

        txn.commit().await.map_err(|e| {
            error!("Failed to commit merge transaction: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(outcome)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
        Entity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete ingredient: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::merged_quantity;

    #[test]
    fn numeric_quantities_add_up() {
        assert_eq!(merged_quantity("2", "3"), "5");
        assert_eq!(merged_quantity("1.5", "0.5"), "2");
        assert_eq!(merged_quantity("200", "150"), "350");
    }

    #[test]
    fn non_numeric_quantities_replace() {
        assert_eq!(merged_quantity("a few", "2"), "2");
        assert_eq!(merged_quantity("2", "some"), "some");
    }
}
