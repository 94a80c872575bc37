use crate::{
    domain::{
        mealplan::entities::MealSlot,
        nutrition::entities::{DietType, LoggedMeal, NutritionTarget},
    },
    entity::{logged_meals, nutrition_targets},
};

impl From<&nutrition_targets::Model> for NutritionTarget {
    fn from(model: &nutrition_targets::Model) -> Self {
        Self {
            user_id: model.user_id,
            calories: model.calories,
            protein_g: model.protein_g,
            carbs_g: model.carbs_g,
            fat_g: model.fat_g,
            fiber_g: model.fiber_g,
            sugar_g: model.sugar_g,
            diet_type: model.diet_type.as_deref().and_then(DietType::parse),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<nutrition_targets::Model> for NutritionTarget {
    fn from(model: nutrition_targets::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&logged_meals::Model> for LoggedMeal {
    fn from(model: &logged_meals::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            slot: MealSlot::parse(&model.slot).unwrap_or(MealSlot::Snack),
            title: model.title.clone(),
            source_recipe_id: model.source_recipe_id.clone(),
            calories: model.calories,
            protein_g: model.protein_g,
            carbs_g: model.carbs_g,
            fat_g: model.fat_g,
            fiber_g: model.fiber_g,
            sugar_g: model.sugar_g,
            quantity: model.quantity,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<logged_meals::Model> for LoggedMeal {
    fn from(model: logged_meals::Model) -> Self {
        Self::from(&model)
    }
}
