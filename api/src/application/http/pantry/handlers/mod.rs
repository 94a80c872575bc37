pub mod create_ingredient;
pub mod delete_ingredient;
pub mod get_ingredients;
pub mod submit_review;
