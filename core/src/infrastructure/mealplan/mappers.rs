use crate::{
    domain::mealplan::entities::{Meal, MealPlan, MealSlot},
    entity::{meal_plans, meals},
};

impl From<&meal_plans::Model> for MealPlan {
    fn from(model: &meal_plans::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            start_date: model.start_date,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<meal_plans::Model> for MealPlan {
    fn from(model: meal_plans::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&meals::Model> for Meal {
    fn from(model: &meals::Model) -> Self {
        Self {
            id: model.id,
            plan_id: model.plan_id,
            date: model.date,
            // The repository only writes slot strings produced by as_str.
            slot: MealSlot::parse(&model.slot).unwrap_or(MealSlot::Snack),
            recipe_id: model.recipe_id,
            title: model.title.clone(),
            notes: model.notes.clone(),
            calories: model.calories,
            protein_g: model.protein_g,
            carbs_g: model.carbs_g,
            fat_g: model.fat_g,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<meals::Model> for Meal {
    fn from(model: meals::Model) -> Self {
        Self::from(&model)
    }
}
