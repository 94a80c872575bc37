pub mod logged_meal_repository;
pub mod nutrition_target_repository;
