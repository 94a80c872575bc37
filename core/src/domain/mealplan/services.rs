use chrono::{Days, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    mealplan::{
        entities::{week_start_monday, Meal, MealSlot},
        ports::MealPlanRepository,
        value_objects::{AddMealInput, ScheduleOutcome, WeekCell, WeekRow, WeekView},
    },
    recipes::ports::SavedRecipeRepository,
    user::value_objects::Identity,
};

fn json_i32(v: &Value, key: &str) -> i32 {
    v.get(key).and_then(Value::as_i64).unwrap_or(0) as i32
}

/// Weekly meal planning over saved recipes. Weeks are keyed by their
/// Monday; scheduling into an occupied slot replaces it.
#[derive(Debug, Clone)]
pub struct MealPlanService<M, S>
where
    M: MealPlanRepository,
    S: SavedRecipeRepository,
{
    plan_repository: M,
    saved_repository: S,
}

impl<M, S> MealPlanService<M, S>
where
    M: MealPlanRepository,
    S: SavedRecipeRepository,
{
    pub fn new(plan_repository: M, saved_repository: S) -> Self {
        Self {
            plan_repository,
            saved_repository,
        }
    }

    /// The week grid around `anchor` (today when absent): seven rows of
    /// four slot cells, empty cells included so the client renders a
    /// stable grid.
    pub async fn week(
        &self,
        identity: &Identity,
        anchor: Option<NaiveDate>,
    ) -> Result<WeekView, CoreError> {
        let anchor = anchor.unwrap_or_else(|| Utc::now().date_naive());
        let week_start = week_start_monday(anchor);
        let week_end = week_start + Days::new(6);

        let plan = self
            .plan_repository
            .get_or_create_plan(identity.id(), week_start)
            .await?;
        let meals = self
            .plan_repository
            .meals_for_range(plan.id, week_start, week_end)
            .await?;

        let rows = (0..7)
            .map(|offset| {
                let date = week_start + Days::new(offset);
                let cells = MealSlot::ALL
                    .iter()
                    .map(|slot| WeekCell {
                        slot: *slot,
                        meal: meals
                            .iter()
                            .find(|m| m.date == date && m.slot == *slot)
                            .cloned(),
                    })
                    .collect();
                WeekRow { date, cells }
            })
            .collect();

        Ok(WeekView {
            week_start,
            prev_week: week_start - Days::new(7),
            next_week: week_start + Days::new(7),
            plan,
            rows,
        })
    }

    /// Put a saved recipe into a slot, snapshotting its macros onto the
    /// plan entry.
    pub async fn schedule(
        &self,
        identity: &Identity,
        input: AddMealInput,
    ) -> Result<(Meal, ScheduleOutcome), CoreError> {
        let recipe = self
            .saved_repository
            .get_by_id(input.recipe_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;

        let week_start = week_start_monday(input.date);
        let plan = self
            .plan_repository
            .get_or_create_plan(identity.id(), week_start)
            .await?;

        let mut meal = Meal::new(plan.id, input.date, input.slot, recipe.title.clone());
        meal.recipe_id = Some(recipe.id);
        meal.calories = json_i32(&recipe.nutrition, "calories");
        meal.protein_g = json_i32(&recipe.nutrition, "protein_g");
        meal.carbs_g = json_i32(&recipe.nutrition, "carbs_g");
        meal.fat_g = json_i32(&recipe.nutrition, "fat_g");

        let (meal, created) = self.plan_repository.upsert_meal(meal).await?;
        let outcome = if created {
            ScheduleOutcome::Created
        } else {
            ScheduleOutcome::Replaced
        };
        Ok((meal, outcome))
    }

    /// Mirror a quick-logged meal into today's plan. Occupied slots are
    /// left alone and reported back as a conflict.
    pub async fn mirror_logged_meal(
        &self,
        identity: &Identity,
        day: NaiveDate,
        slot: MealSlot,
        title: String,
        calories: i32,
        protein_g: i32,
        carbs_g: i32,
        fat_g: i32,
    ) -> Result<Option<Meal>, CoreError> {
        let plan = self
            .plan_repository
            .get_or_create_plan(identity.id(), week_start_monday(day))
            .await?;

        let occupied = self
            .plan_repository
            .meals_for_day(identity.id(), day)
            .await?
            .into_iter()
            .any(|m| m.slot == slot);
        if occupied {
            return Ok(None);
        }

        let mut meal = Meal::new(plan.id, day, slot, title);
        meal.calories = calories;
        meal.protein_g = protein_g;
        meal.carbs_g = carbs_g;
        meal.fat_g = fat_g;
        let (meal, _) = self.plan_repository.upsert_meal(meal).await?;
        Ok(Some(meal))
    }

    /// All planned meals for one day, used by the plan-to-log sync.
    pub async fn planned_for_day(
        &self,
        identity: &Identity,
        day: NaiveDate,
    ) -> Result<Vec<Meal>, CoreError> {
        self.plan_repository.meals_for_day(identity.id(), day).await
    }

    pub async fn remove(&self, identity: &Identity, meal_id: Uuid) -> Result<Meal, CoreError> {
        let meal = self
            .plan_repository
            .get_meal(meal_id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;
        self.plan_repository
            .delete_meal(meal_id, identity.id())
            .await?;
        Ok(meal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mealplan::entities::MealPlan;
    use crate::domain::recipes::entities::{RecipeSource, SavedRecipe};
    use serde_json::json;
    use std::sync::Mutex;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "tester".into(),
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

        async fn get_meal(&self, id: Uuid, user_id: Uuid) -> Result<Option<Meal>, CoreError> {
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
                .find(|m| m.id == id && plan_ids.contains(&m.plan_id))
                .cloned())
        }

        async fn delete_meal(&self, id: Uuid, _user_id: Uuid) -> Result<(), CoreError> {
            self.meals.lock().unwrap().retain(|m| m.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeSavedRepository {
        rows: Mutex<Vec<SavedRecipe>>,
    }

    impl SavedRecipeRepository for FakeSavedRepository {
        async fn create(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
            self.rows.lock().unwrap().push(recipe.clone());
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
            id: Uuid,
            user_id: Uuid,
        ) -> Result<Option<SavedRecipe>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id && r.user_id == user_id)
                .cloned())
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

    fn saved_recipe(user_id: Uuid) -> SavedRecipe {
        SavedRecipe::new(
            user_id,
            RecipeSource::Web,
            "101".into(),
            "Pepper Chicken".into(),
            None,
            vec!["bell pepper".into()],
            vec!["Cook.".into()],
            json!({"calories": 420, "protein_g": 35}),
        )
    }

    #[tokio::test]
    async fn week_grid_has_seven_days_of_four_slots() {
        let svc = MealPlanService::new(FakePlanRepository::default(), FakeSavedRepository::default());
        let anchor = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let view = svc.week(&identity(), Some(anchor)).await.unwrap();

        assert_eq!(view.week_start, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
        assert_eq!(view.rows.len(), 7);
        assert!(view.rows.iter().all(|r| r.cells.len() == 4));
        assert_eq!(view.prev_week, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(view.next_week, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
    }

    #[tokio::test]
    async fn scheduling_into_an_occupied_slot_replaces_it() {
        let id = identity();
        let saved = FakeSavedRepository::default();
        let first = saved_recipe(id.id());
        let second = saved_recipe(id.id());
        saved.rows.lock().unwrap().push(first.clone());
        saved.rows.lock().unwrap().push(second.clone());

        let svc = MealPlanService::new(FakePlanRepository::default(), saved);
        let date = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let (_, outcome) = svc
            .schedule(
                &id,
                AddMealInput {
                    recipe_id: first.id,
                    date,
                    slot: MealSlot::Dinner,
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, ScheduleOutcome::Created);

        let (meal, outcome) = svc
            .schedule(
                &id,
                AddMealInput {
                    recipe_id: second.id,
                    date,
                    slot: MealSlot::Dinner,
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, ScheduleOutcome::Replaced);
        assert_eq!(meal.calories, 420);
        assert_eq!(meal.recipe_id, Some(second.id));
    }

    #[tokio::test]
    async fn mirroring_skips_occupied_slots() {
        let id = identity();
        let svc = MealPlanService::new(FakePlanRepository::default(), FakeSavedRepository::default());
        let day = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let first = svc
            .mirror_logged_meal(&id, day, MealSlot::Lunch, "Chicken bowl".into(), 500, 40, 30, 20)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = svc
            .mirror_logged_meal(&id, day, MealSlot::Lunch, "Another bowl".into(), 400, 30, 20, 10)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn scheduling_an_unknown_recipe_is_not_found() {
        let svc = MealPlanService::new(FakePlanRepository::default(), FakeSavedRepository::default());
        let result = svc
            .schedule(
                &identity(),
                AddMealInput {
                    recipe_id: Uuid::new_v4(),
                    date: NaiveDate::from_ymd_opt(2025, 6, 11).unwrap(),
                    slot: MealSlot::Lunch,
                },
            )
            .await;
        assert_eq!(result, Err(CoreError::NotFound));
    }
}
