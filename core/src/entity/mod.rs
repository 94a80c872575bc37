pub mod ingredients;
pub mod logged_meals;
pub mod meal_plans;
pub mod meals;
pub mod nutrition_targets;
pub mod pantry_image_uploads;
pub mod saved_recipes;
pub mod users;
