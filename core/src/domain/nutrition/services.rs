use chrono::{NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    mealplan::{ports::MealPlanRepository, services::MealPlanService},
    nutrition::{
        aggregate::{compute_daily_totals, DailyTotals},
        entities::{LoggedMeal, NutritionTarget},
        ports::{LoggedMealRepository, NutritionTargetRepository},
        value_objects::{
            LogRecipeInput, MacroPrefill, NutritionOverview, QuickLogInput, QuickLogOutcome,
            TargetInput,
        },
    },
    recipes::{
        entities::RecipeSource,
        normalize::search_items_from_results,
        ports::{RecipeSearchClient, SavedRecipeRepository},
        value_objects::ProviderSearchQuery,
    },
    session::ports::SearchResultCache,
    user::value_objects::Identity,
};

/// Cap on gap-closing suggestions.
const SUGGESTION_CAP: usize = 4;
const SUGGESTION_FETCH: u32 = 12;

fn nutrient_amount(det: &Value, name: &str) -> i32 {
    det.get("nutrition")
        .and_then(|n| n.get("nutrients"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .find(|n| {
            n.get("name")
                .and_then(Value::as_str)
                .map(|s| s.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
        .and_then(|n| n.get("amount").and_then(Value::as_f64))
        .map(|a| a.round() as i32)
        .unwrap_or(0)
}

/// guessNutrition wraps each figure as `{"value": n, "unit": ...}`.
fn guessed_value(payload: &Value, key: &str) -> i32 {
    payload
        .get(key)
        .and_then(|k| k.get("value"))
        .and_then(Value::as_f64)
        .map(|v| v.round() as i32)
        .unwrap_or(0)
}

/// Targets, the daily log, plan-to-log syncing and gap suggestions.
#[derive(Debug, Clone)]
pub struct NutritionService<T, L, M, S, P, C>
where
    T: NutritionTargetRepository,
    L: LoggedMealRepository,
    M: MealPlanRepository,
    S: SavedRecipeRepository,
    P: RecipeSearchClient,
    C: SearchResultCache,
{
    target_repository: T,
    logged_repository: L,
    plan_service: MealPlanService<M, S>,
    provider: P,
    cache: C,
}

impl<T, L, M, S, P, C> NutritionService<T, L, M, S, P, C>
where
    T: NutritionTargetRepository,
    L: LoggedMealRepository,
    M: MealPlanRepository,
    S: SavedRecipeRepository,
    P: RecipeSearchClient,
    C: SearchResultCache,
{
    pub fn new(
        target_repository: T,
        logged_repository: L,
        plan_service: MealPlanService<M, S>,
        provider: P,
        cache: C,
    ) -> Self {
        Self {
            target_repository,
            logged_repository,
            plan_service,
            provider,
            cache,
        }
    }

    pub async fn target(&self, identity: &Identity) -> Result<NutritionTarget, CoreError> {
        Ok(self
            .target_repository
            .get(identity.id())
            .await?
            .unwrap_or_else(|| NutritionTarget::default_for(identity.id())))
    }

    pub async fn upsert_target(
        &self,
        identity: &Identity,
        input: TargetInput,
    ) -> Result<NutritionTarget, CoreError> {
        let all = [
            Some(input.calories),
            input.protein_g,
            input.carbs_g,
            input.fat_g,
            input.fiber_g,
            input.sugar_g,
        ];
        if all.iter().flatten().any(|v| *v < 0) {
            return Err(CoreError::Invalid("targets must not be negative".into()));
        }

        let mut target = self.target(identity).await?;
        target.calories = input.calories;
        target.protein_g = input.protein_g;
        target.carbs_g = input.carbs_g;
        target.fat_g = input.fat_g;
        target.fiber_g = input.fiber_g;
        target.sugar_g = input.sugar_g;
        target.diet_type = input.diet_type;
        target.updated_at = Utc::now();
        self.target_repository.upsert(target).await
    }

    /// Drop the stored row; the user falls back to the defaults.
    pub async fn reset_target(&self, identity: &Identity) -> Result<NutritionTarget, CoreError> {
        self.target_repository.delete(identity.id()).await?;
        Ok(NutritionTarget::default_for(identity.id()))
    }

    /// The targets page payload: sync today's plan into the log, sum the
    /// day, and fetch gap suggestions. Sync and suggestion failures are
    /// absorbed so the page always renders.
    pub async fn overview(
        &self,
        identity: &Identity,
        session_id: &str,
    ) -> Result<NutritionOverview, CoreError> {
        let today = Utc::now().date_naive();
        let target = self.target(identity).await?;

        if let Err(e) = self.sync_from_plan(identity, today).await {
            tracing::warn!("plan-to-log sync failed: {}", e);
        }

        let meals = self.logged_repository.list_for_day(identity.id(), today).await?;
        let totals = compute_daily_totals(&meals, &target);

        let suggestions = match self.suggest_for_gaps(&target, &totals).await {
            Ok(items) => {
                if !items.is_empty() {
                    self.cache
                        .stash_web_items(session_id.to_string(), items.clone())
                        .await;
                }
                items
            }
            Err(e) => {
                tracing::warn!("gap suggestions unavailable: {}", e);
                Vec::new()
            }
        };

        Ok(NutritionOverview {
            target,
            totals,
            meals,
            suggestions,
        })
    }

    /// Copy today's planned meals into the log, once per
    /// (day, slot, source recipe).
    async fn sync_from_plan(&self, identity: &Identity, day: NaiveDate) -> Result<(), CoreError> {
        let planned = self.plan_service.planned_for_day(identity, day).await?;

        for item in planned {
            let source_recipe_id = item.source_recipe_id();
            let already = self
                .logged_repository
                .exists_for_slot(identity.id(), day, item.slot, source_recipe_id.clone())
                .await?;
            if already {
                continue;
            }

            let mut meal = LoggedMeal::new(identity.id(), day, item.slot, item.title.clone());
            meal.source_recipe_id = source_recipe_id;
            meal.calories = item.calories;
            meal.protein_g = item.protein_g;
            meal.carbs_g = item.carbs_g;
            meal.fat_g = item.fat_g;
            self.logged_repository.create(meal).await?;
        }
        Ok(())
    }

    /// Log a custom meal for today and mirror it into the plan. The
    /// mirror never blocks the log; an occupied slot becomes a warning.
    pub async fn quick_log(
        &self,
        identity: &Identity,
        input: QuickLogInput,
    ) -> Result<QuickLogOutcome, CoreError> {
        let today = Utc::now().date_naive();
        let title = {
            let t = input.title.trim();
            if t.is_empty() { "Custom meal" } else { t }.to_string()
        };
        let quantity = if input.quantity > 0.0 { input.quantity } else { 1.0 };

        let mut meal = LoggedMeal::new(identity.id(), today, input.slot, title.clone());
        meal.calories = input.calories.max(0);
        meal.protein_g = input.protein_g.max(0);
        meal.carbs_g = input.carbs_g.max(0);
        meal.fat_g = input.fat_g.max(0);
        meal.quantity = quantity;
        let meal = self.logged_repository.create(meal).await?;

        let scale = |v: i32| (v as f64 * quantity).round() as i32;
        let plan_conflict = match self
            .plan_service
            .mirror_logged_meal(
                identity,
                today,
                input.slot,
                title,
                scale(meal.calories),
                scale(meal.protein_g),
                scale(meal.carbs_g),
                scale(meal.fat_g),
            )
            .await
        {
            Ok(Some(_)) => None,
            Ok(None) => Some(format!(
                "There is already a {} in your meal plan for today.",
                input.slot.as_str()
            )),
            Err(e) => {
                tracing::warn!("could not mirror quick log into the plan: {}", e);
                None
            }
        };

        Ok(QuickLogOutcome { meal, plan_conflict })
    }

    /// Log a cached search result for today. Macros come from the client
    /// override, the cached record, then a provider prefill.
    pub async fn log_recipe(
        &self,
        identity: &Identity,
        session_id: &str,
        source: RecipeSource,
        id: &str,
        input: LogRecipeInput,
    ) -> Result<LoggedMeal, CoreError> {
        let record = self
            .cache
            .lookup(session_id.to_string(), source, id.to_string())
            .await
            .ok_or(CoreError::NotFound)?;

        let mut calories = input.calories.or(record.calories).unwrap_or(0);
        let mut protein_g = input.protein_g.or(record.protein_g).unwrap_or(0);
        let mut carbs_g = input.carbs_g.unwrap_or(0);
        let mut fat_g = input.fat_g.unwrap_or(0);

        if calories == 0 && protein_g == 0 {
            let prefill = self.prefill_macros(source, &record.id, &record.title).await;
            calories = prefill.calories;
            protein_g = prefill.protein_g;
            carbs_g = prefill.carbs_g;
            fat_g = prefill.fat_g;
        }

        let today = Utc::now().date_naive();
        let mut meal = LoggedMeal::new(identity.id(), today, input.slot, record.title.clone());
        let mut source_recipe_id = record.id.clone();
        source_recipe_id.truncate(64);
        meal.source_recipe_id = source_recipe_id;
        meal.calories = calories.max(0);
        meal.protein_g = protein_g.max(0);
        meal.carbs_g = carbs_g.max(0);
        meal.fat_g = fat_g.max(0);
        meal.quantity = if input.quantity > 0.0 { input.quantity } else { 1.0 };
        self.logged_repository.create(meal).await
    }

    /// Best-effort macro estimates: the detail endpoint with nutrition
    /// for provider ids, the title-based guess for AI recipes. Errors
    /// collapse to zeros.
    pub async fn prefill_macros(
        &self,
        source: RecipeSource,
        id: &str,
        title: &str,
    ) -> MacroPrefill {
        match source {
            RecipeSource::Web => match self.provider.information(id.to_string()).await {
                Ok(Some(det)) => MacroPrefill {
                    calories: nutrient_amount(&det, "calories"),
                    protein_g: nutrient_amount(&det, "protein"),
                    carbs_g: nutrient_amount(&det, "carbohydrates"),
                    fat_g: nutrient_amount(&det, "fat"),
                },
                Ok(None) => MacroPrefill::default(),
                Err(e) => {
                    tracing::debug!("macro prefill by id failed: {}", e);
                    MacroPrefill::default()
                }
            },
            RecipeSource::Ai => match self.provider.guess_nutrition(title.to_string()).await {
                Ok(Some(payload)) => MacroPrefill {
                    calories: guessed_value(&payload, "calories"),
                    protein_g: guessed_value(&payload, "protein"),
                    carbs_g: guessed_value(&payload, "carbs"),
                    fat_g: guessed_value(&payload, "fat"),
                },
                Ok(None) => MacroPrefill::default(),
                Err(e) => {
                    tracing::debug!("macro prefill by title failed: {}", e);
                    MacroPrefill::default()
                }
            },
        }
    }

    pub async fn delete_log(&self, identity: &Identity, id: Uuid) -> Result<(), CoreError> {
        self.logged_repository
            .get_by_id(id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;
        self.logged_repository.delete(id, identity.id()).await
    }

    /// A short list of recipes that close today's biggest gap: protein
    /// first, then calories, else something light.
    async fn suggest_for_gaps(
        &self,
        target: &NutritionTarget,
        totals: &DailyTotals,
    ) -> Result<Vec<crate::domain::recipes::entities::RecipeRecord>, CoreError> {
        let protein_gap = (target.protein_g.unwrap_or(0) - totals.protein_g).max(0);
        let calorie_gap = (target.calories - totals.calories).max(0);

        let (query, min_protein, max_calories) = if protein_gap >= 25 {
            ("high protein quick", Some(25), None)
        } else if calorie_gap >= 300 {
            ("balanced dinner", Some(15), Some(600))
        } else {
            ("light snack", Some(10), Some(300))
        };

        let results = self
            .provider
            .search(ProviderSearchQuery {
                query: Some(query.to_string()),
                number: SUGGESTION_FETCH,
                add_recipe_nutrition: true,
                min_protein,
                max_calories,
                ..Default::default()
            })
            .await?;

        let mut items = search_items_from_results(&results);
        items.truncate(SUGGESTION_CAP);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mealplan::entities::{Meal, MealPlan, MealSlot};
    use crate::domain::recipes::entities::{RecipeRecord, SavedRecipe};
    use crate::domain::session::entities::SearchResultBundle;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "tester".into(),
        }
    }

    #[derive(Default)]
    struct FakeTargetRepository {
        row: Mutex<Option<NutritionTarget>>,
    }

    impl NutritionTargetRepository for FakeTargetRepository {
        async fn get(&self, user_id: Uuid) -> Result<Option<NutritionTarget>, CoreError> {
            Ok(self
                .row
                .lock()
                .unwrap()
                .clone()
                .filter(|t| t.user_id == user_id))
        }

        async fn upsert(&self, target: NutritionTarget) -> Result<NutritionTarget, CoreError> {
            *self.row.lock().unwrap() = Some(target.clone());
            Ok(target)
        }

        async fn delete(&self, _user_id: Uuid) -> Result<(), CoreError> {
            *self.row.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLoggedRepository {
        rows: Mutex<Vec<LoggedMeal>>,
    }

    impl LoggedMealRepository for FakeLoggedRepository {
        async fn create(&self, meal: LoggedMeal) -> Result<LoggedMeal, CoreError> {
            self.rows.lock().unwrap().push(meal.clone());
            Ok(meal)
        }

        async fn list_for_day(
            &self,
            user_id: Uuid,
            day: NaiveDate,
        ) -> Result<Vec<LoggedMeal>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.user_id == user_id && m.date == day)
                .cloned()
                .collect())
        }

        async fn exists_for_slot(
            &self,
            user_id: Uuid,
            day: NaiveDate,
            slot: MealSlot,
            source_recipe_id: String,
        ) -> Result<bool, CoreError> {
            Ok(self.rows.lock().unwrap().iter().any(|m| {
                m.user_id == user_id
                    && m.date == day
                    && m.slot == slot
                    && m.source_recipe_id == source_recipe_id
            }))
        }

        async fn get_by_id(
            &self,
            id: Uuid,
            user_id: Uuid,
        ) -> Result<Option<LoggedMeal>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == id && m.user_id == user_id)
                .cloned())
        }

        async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
            self.rows
                .lock()
                .unwrap()
                .retain(|m| !(m.id == id && m.user_id == user_id));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakePlanRepository {
        plans: Mutex<Vec<MealPlan>>,
        meals: Mutex<Vec<Meal>>,
    }

    impl MealPlanRepository for FakePlanRepository {
        async fn get_or_create_plan(
            &self,
            user_id: Uuid,
            start_date: NaiveDate,
        ) -> Result<MealPlan, CoreError> {
            let mut plans = self.plans.lock().unwrap();
            if let Some(plan) = plans
                .iter()
                .find(|p| p.user_id == user_id && p.start_date == start_date)
            {
                return Ok(plan.clone());
            }
            let plan = MealPlan::new(user_id, start_date);
            plans.push(plan.clone());
            Ok(plan)
        }

        async fn upsert_meal(&self, meal: Meal) -> Result<(Meal, bool), CoreError> {
            let mut meals = self.meals.lock().unwrap();
            if let Some(existing) = meals
                .iter_mut()
                .find(|m| m.plan_id == meal.plan_id && m.date == meal.date && m.slot == meal.slot)
            {
                let id = existing.id;
                *existing = Meal { id, ..meal };
                return Ok((existing.clone(), false));
            }
            meals.push(meal.clone());
            Ok((meal, true))
        }

        async fn meals_for_range(
            &self,
            plan_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<Meal>, CoreError> {
            Ok(self
                .meals
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.plan_id == plan_id && m.date >= from && m.date <= to)
                .cloned()
                .collect())
        }

        async fn meals_for_day(
            &self,
            user_id: Uuid,
            day: NaiveDate,
        ) -> Result<Vec<Meal>, CoreError> {
            let plan_ids: Vec<Uuid> = self
                .plans
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.user_id == user_id)
                .map(|p| p.id)
                .collect();
            Ok(self
                .meals
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.date == day && plan_ids.contains(&m.plan_id))
                .cloned()
                .collect())
        }

        async fn get_meal(&self, id: Uuid, _user_id: Uuid) -> Result<Option<Meal>, CoreError> {
            Ok(self
                .meals
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == id)
                .cloned())
        }

        async fn delete_meal(&self, id: Uuid, _user_id: Uuid) -> Result<(), CoreError> {
            self.meals.lock().unwrap().retain(|m| m.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeSavedRepository;

    impl SavedRecipeRepository for FakeSavedRepository {
        async fn create(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
            Ok(recipe)
        }

        async fn get_by_key(
            &self,
            _user_id: Uuid,
            _source: RecipeSource,
            _external_id: String,
        ) -> Result<Option<SavedRecipe>, CoreError> {
            Ok(None)
        }

        async fn get_by_id(
            &self,
            _id: Uuid,
            _user_id: Uuid,
        ) -> Result<Option<SavedRecipe>, CoreError> {
            Ok(None)
        }

        async fn list_by_user(&self, _user_id: Uuid) -> Result<Vec<SavedRecipe>, CoreError> {
            Ok(Vec::new())
        }

        async fn update(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
            Ok(recipe)
        }

        async fn delete(&self, _id: Uuid, _user_id: Uuid) -> Result<(), CoreError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeProvider {
        last_query: Mutex<Option<ProviderSearchQuery>>,
        search_results: Vec<Value>,
        guess: Option<Value>,
    }

    impl RecipeSearchClient for FakeProvider {
        async fn search(&self, query: ProviderSearchQuery) -> Result<Vec<Value>, CoreError> {
            *self.last_query.lock().unwrap() = Some(query);
            Ok(self.search_results.clone())
        }

        async fn find_by_ingredients(
            &self,
            _ingredients: Vec<String>,
            _number: u32,
        ) -> Result<Vec<Value>, CoreError> {
            Ok(Vec::new())
        }

        async fn information_bulk(&self, _ids: Vec<String>) -> Result<Vec<Value>, CoreError> {
            Ok(Vec::new())
        }

        async fn information(&self, _id: String) -> Result<Option<Value>, CoreError> {
            Ok(None)
        }

        async fn guess_nutrition(&self, _title: String) -> Result<Option<Value>, CoreError> {
            Ok(self.guess.clone())
        }

        async fn image_for_title(&self, _title: String) -> Result<Option<String>, CoreError> {
            Ok(None)
        }

        async fn fetch_image(&self, _url: String) -> Result<Option<bytes::Bytes>, CoreError> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct FakeCache {
        bundles: Mutex<HashMap<String, SearchResultBundle>>,
        stashed: Mutex<Vec<RecipeRecord>>,
    }

    impl SearchResultCache for FakeCache {
        async fn store(&self, session_id: String, bundle: SearchResultBundle) {
            self.bundles.lock().unwrap().insert(session_id, bundle);
        }

        async fn bundle(&self, session_id: String) -> Option<SearchResultBundle> {
            self.bundles.lock().unwrap().get(&session_id).cloned()
        }

        async fn lookup(
            &self,
            session_id: String,
            source: RecipeSource,
            id: String,
        ) -> Option<RecipeRecord> {
            self.bundles
                .lock()
                .unwrap()
                .get(&session_id)?
                .list_for(source)
                .iter()
                .find(|r| r.id == id)
                .cloned()
        }

        async fn attach_image(&self, _session_id: String, _id: String, _image_url: String) {}

        async fn stash_web_items(&self, _session_id: String, items: Vec<RecipeRecord>) {
            self.stashed.lock().unwrap().extend(items);
        }
    }

    type TestService = NutritionService<
        FakeTargetRepository,
        FakeLoggedRepository,
        FakePlanRepository,
        FakeSavedRepository,
        FakeProvider,
        FakeCache,
    >;

    fn service(provider: FakeProvider) -> TestService {
        NutritionService::new(
            FakeTargetRepository::default(),
            FakeLoggedRepository::default(),
            MealPlanService::new(FakePlanRepository::default(), FakeSavedRepository),
            provider,
            FakeCache::default(),
        )
    }

    #[tokio::test]
    async fn overview_syncs_planned_meals_exactly_once() {
        let id = identity();
        let svc = service(FakeProvider::default());

        // Put a planned dinner on today's plan through the plan service.
        let today = Utc::now().date_naive();
        svc.plan_service
            .mirror_logged_meal(&id, today, MealSlot::Dinner, "Planned stew".into(), 600, 35, 40, 20)
            .await
            .unwrap();

        let first = svc.overview(&id, "s1").await.unwrap();
        assert_eq!(first.meals.len(), 1);
        assert_eq!(first.meals[0].title, "Planned stew");
        assert_eq!(first.totals.calories, 600);

        // A second render must not duplicate the synced row.
        let second = svc.overview(&id, "s1").await.unwrap();
        assert_eq!(second.meals.len(), 1);
    }

    #[tokio::test]
    async fn quick_log_mirrors_into_the_plan_and_flags_conflicts() {
        let id = identity();
        let svc = service(FakeProvider::default());

        let input = QuickLogInput {
            title: "Chicken bowl".into(),
            slot: MealSlot::Lunch,
            calories: 500,
            protein_g: 40,
            carbs_g: 30,
            fat_g: 20,
            quantity: 1.0,
        };

        let first = svc.quick_log(&id, input.clone()).await.unwrap();
        assert!(first.plan_conflict.is_none());

        let second = svc.quick_log(&id, input).await.unwrap();
        assert!(second.plan_conflict.is_some());
    }

    #[tokio::test]
    async fn protein_gap_drives_the_suggestion_query() {
        let id = identity();
        let svc = service(FakeProvider {
            search_results: vec![
                json!({"id": 1, "title": "Grilled Chicken", "protein": 42.0, "calories": 350.0}),
            ],
            ..Default::default()
        });

        svc.upsert_target(
            &id,
            TargetInput {
                calories: 2000,
                protein_g: Some(120),
                carbs_g: None,
                fat_g: None,
                fiber_g: None,
                sugar_g: None,
                diet_type: None,
            },
        )
        .await
        .unwrap();

        let overview = svc.overview(&id, "s1").await.unwrap();

        let query = svc.provider.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.query.as_deref(), Some("high protein quick"));
        assert_eq!(query.min_protein, Some(25));
        assert_eq!(query.max_calories, None);
        assert_eq!(overview.suggestions.len(), 1);
        // Suggestions land in the session cache so detail links resolve.
        assert_eq!(svc.cache.stashed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn small_gaps_ask_for_a_light_snack() {
        let id = identity();
        let svc = service(FakeProvider::default());

        svc.upsert_target(
            &id,
            TargetInput {
                calories: 100,
                protein_g: Some(5),
                carbs_g: None,
                fat_g: None,
                fiber_g: None,
                sugar_g: None,
                diet_type: None,
            },
        )
        .await
        .unwrap();

        svc.overview(&id, "s1").await.unwrap();

        let query = svc.provider.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.query.as_deref(), Some("light snack"));
        assert_eq!(query.max_calories, Some(300));
    }

    #[tokio::test]
    async fn logging_an_ai_recipe_prefills_macros_from_the_guess() {
        let id = identity();
        let svc = service(FakeProvider {
            guess: Some(json!({
                "calories": {"value": 316.0, "unit": "kcal"},
                "protein": {"value": 8.2, "unit": "g"},
                "carbs": {"value": 45.0, "unit": "g"},
                "fat": {"value": 12.0, "unit": "g"},
            })),
            ..Default::default()
        });

        let record = RecipeRecord {
            id: "berry-smoothie".into(),
            title: "Berry Smoothie".into(),
            source: RecipeSource::Ai,
            ..Default::default()
        };
        svc.cache
            .store("s1".into(), SearchResultBundle::new(vec![record], Vec::new()))
            .await;

        let meal = svc
            .log_recipe(
                &id,
                "s1",
                RecipeSource::Ai,
                "berry-smoothie",
                LogRecipeInput {
                    slot: MealSlot::Breakfast,
                    quantity: 1.0,
                    calories: None,
                    protein_g: None,
                    carbs_g: None,
                    fat_g: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(meal.calories, 316);
        assert_eq!(meal.protein_g, 8);
        assert_eq!(meal.carbs_g, 45);
        assert_eq!(meal.fat_g, 12);
        assert_eq!(meal.source_recipe_id, "berry-smoothie");
    }

    #[tokio::test]
    async fn negative_targets_are_rejected() {
        let svc = service(FakeProvider::default());
        let result = svc
            .upsert_target(
                &identity(),
                TargetInput {
                    calories: -1,
                    protein_g: None,
                    carbs_g: None,
                    fat_g: None,
                    fiber_g: None,
                    sugar_g: None,
                    diet_type: None,
                },
            )
            .await;
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }
}
