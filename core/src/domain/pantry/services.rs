use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pantry::{
        entities::Ingredient,
        ports::IngredientRepository,
        value_objects::{AddIngredientInput, MergeOutcome, ReviewRow, ReviewSummary},
    },
    user::value_objects::Identity,
};

#[derive(Debug, Clone)]
pub struct PantryService<R>
where
    R: IngredientRepository,
{
    ingredient_repository: R,
}

impl<R> PantryService<R>
where
    R: IngredientRepository,
{
    pub fn new(ingredient_repository: R) -> Self {
        Self {
            ingredient_repository,
        }
    }

    pub async fn list(&self, identity: &Identity) -> Result<Vec<Ingredient>, CoreError> {
        self.ingredient_repository.list_by_user(identity.id()).await
    }

    pub async fn add(
        &self,
        identity: &Identity,
        input: AddIngredientInput,
    ) -> Result<Ingredient, CoreError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Invalid("name must not be empty".into()));
        }

        if self
            .ingredient_repository
            .get_by_name_ci(identity.id(), name.clone())
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyExists(name));
        }

        let ingredient = Ingredient::new(identity.id(), name, input.quantity, input.unit);
        self.ingredient_repository.create(ingredient).await
    }

    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), CoreError> {
        self.ingredient_repository
            .get_by_id(id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;
        self.ingredient_repository.delete(id, identity.id()).await
    }

    /// Apply reviewed extraction rows. One bad row never aborts the rest;
    /// blank names are skipped and counted.
    pub async fn apply_review_rows(
        &self,
        identity: &Identity,
        rows: Vec<ReviewRow>,
    ) -> Result<ReviewSummary, CoreError> {
        let mut summary = ReviewSummary::default();

        for row in rows {
            let name = row.name.trim().to_string();
            if name.is_empty() {
                summary.skipped += 1;
                continue;
            }

            match self
                .ingredient_repository
                .merge_or_create(identity.id(), name.clone(), row.quantity, row.unit)
                .await
            {
                Ok(MergeOutcome::Added) => summary.added += 1,
                Ok(MergeOutcome::Updated) => summary.updated += 1,
                Err(e) => {
                    tracing::warn!("could not merge review row '{}': {}", name, e);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "tester".into(),
        }
    }

    /// In-memory fake keyed by lowercased name.
    #[derive(Default)]
    struct FakeIngredientRepository {
        rows: Mutex<Vec<Ingredient>>,
    }

    impl IngredientRepository for FakeIngredientRepository {
        async fn create(&self, ingredient: Ingredient) -> Result<Ingredient, CoreError> {
            self.rows.lock().unwrap().push(ingredient.clone());
            Ok(ingredient)
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ingredient>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Ingredient>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id && i.user_id == user_id)
                .cloned())
        }

        async fn get_by_name_ci(
            &self,
            user_id: Uuid,
            name: String,
        ) -> Result<Option<Ingredient>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.user_id == user_id && i.name.to_lowercase() == name.to_lowercase())
                .cloned())
        }

        async fn merge_or_create(
            &self,
            user_id: Uuid,
            name: String,
            quantity: String,
            unit: String,
        ) -> Result<MergeOutcome, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows
                .iter_mut()
                .find(|i| i.user_id == user_id && i.name.to_lowercase() == name.to_lowercase())
            {
                existing.quantity = quantity;
                Ok(MergeOutcome::Updated)
            } else {
                rows.push(Ingredient::new(user_id, name, quantity, unit));
                Ok(MergeOutcome::Added)
            }
        }

        async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
            self.rows
                .lock()
                .unwrap()
                .retain(|i| !(i.id == id && i.user_id == user_id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn add_rejects_duplicate_name_case_insensitively() {
        let id = identity();
        let repo = FakeIngredientRepository::default();
        repo.rows
            .lock()
            .unwrap()
            .push(Ingredient::new(id.id(), "Milk".into(), "1".into(), "l".into()));

        let service = PantryService::new(repo);
        let result = service
            .add(
                &id,
                AddIngredientInput {
                    name: "milk".into(),
                    quantity: "2".into(),
                    unit: "l".into(),
                },
            )
            .await;

        assert_eq!(result, Err(CoreError::AlreadyExists("milk".into())));
        assert_eq!(service.list(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn review_rows_skip_blanks_and_count_outcomes() {
        let id = identity();
        let repo = FakeIngredientRepository::default();
        repo.rows.lock().unwrap().push(Ingredient::new(
            id.id(),
            "Chicken Breast".into(),
            "100".into(),
            "g".into(),
        ));

        let service = PantryService::new(repo);
        let summary = service
            .apply_review_rows(
                &id,
                vec![
                    ReviewRow {
                        name: "onion".into(),
                        quantity: "1".into(),
                        unit: "pc".into(),
                    },
                    ReviewRow {
                        name: "   ".into(),
                        quantity: "".into(),
                        unit: "".into(),
                    },
                    ReviewRow {
                        name: "chicken breast".into(),
                        quantity: "200".into(),
                        unit: "g".into(),
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_found() {
        let id = identity();
        let service = PantryService::new(FakeIngredientRepository::default());
        let result = service.delete(&id, Uuid::new_v4()).await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_never_reaches_the_store_for_a_foreign_row() {
        use crate::domain::pantry::ports::MockIngredientRepository;

        let id = identity();
        let mut repo = MockIngredientRepository::new();
        repo.expect_get_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        repo.expect_delete().times(0);

        let service = PantryService::new(repo);
        let result = service.delete(&id, Uuid::new_v4()).await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn a_failed_merge_counts_the_row_as_skipped() {
        use crate::domain::pantry::ports::MockIngredientRepository;

        let id = identity();
        let mut repo = MockIngredientRepository::new();
        repo.expect_merge_or_create()
            .returning(|_, name, _, _| {
                Box::pin(async move {
                    if name == "onion" {
                        Err(CoreError::InternalServerError)
                    } else {
                        Ok(MergeOutcome::Added)
                    }
                })
            });

        let service = PantryService::new(repo);
        let summary = service
            .apply_review_rows(
                &id,
                vec![
                    ReviewRow {
                        name: "onion".into(),
                        quantity: "1".into(),
                        unit: "pc".into(),
                    },
                    ReviewRow {
                        name: "garlic".into(),
                        quantity: "2".into(),
                        unit: "cloves".into(),
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.updated, 0);
    }
}
