use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pantry::{entities::Ingredient, value_objects::MergeOutcome},
};

#[cfg_attr(test, mockall::automock)]
pub trait IngredientRepository: Send + Sync {
    fn create(
        &self,
        ingredient: Ingredient,
    ) -> impl Future<Output = Result<Ingredient, CoreError>> + Send;

    fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;

    fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<Ingredient>, CoreError>> + Send;

    fn get_by_name_ci(
        &self,
        user_id: Uuid,
        name: String,
    ) -> impl Future<Output = Result<Option<Ingredient>, CoreError>> + Send;

    /// Review-screen merge: read-modify-write of the matching ingredient
    /// row under a row-level lock inside one transaction, so two review
    /// submissions racing on the same name cannot lose an update.
    /// Creates the row when no case-insensitive match exists.
    fn merge_or_create(
        &self,
        user_id: Uuid,
        name: String,
        quantity: String,
        unit: String,
    ) -> impl Future<Output = Result<MergeOutcome, CoreError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
