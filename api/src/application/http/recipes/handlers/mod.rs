pub mod create_favorite;
pub mod delete_favorite;
pub mod get_favorite;
pub mod get_favorites;
pub mod get_recipe_detail;
pub mod get_results;
pub mod save_recipe;
pub mod search_recipes;
pub mod update_favorite;
