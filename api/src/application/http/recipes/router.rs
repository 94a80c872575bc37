use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use super::handlers::{
    create_favorite::{__path_create_favorite, create_favorite},
    delete_favorite::{__path_delete_favorite, delete_favorite},
    get_favorite::{__path_get_favorite, get_favorite},
    get_favorites::{__path_get_favorites, get_favorites},
    get_recipe_detail::{__path_get_recipe_detail, get_recipe_detail},
    get_results::{__path_get_results, get_results},
    save_recipe::{__path_save_recipe, save_recipe},
    search_recipes::{__path_search_recipes, search_recipes},
    update_favorite::{__path_update_favorite, update_favorite},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    search_recipes,
    get_results,
    get_recipe_detail,
    save_recipe,
    get_favorites,
    create_favorite,
    get_favorite,
    update_favorite,
    delete_favorite
))]
pub struct RecipesApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(&format!("{}/recipes/search", root_path), post(search_recipes))
        .route(&format!("{}/recipes/results", root_path), get(get_results))
        .route(
            &format!("{}/recipes/{{source}}/{{id}}", root_path),
            get(get_recipe_detail),
        )
        .route(
            &format!("{}/recipes/{{source}}/{{id}}/save", root_path),
            post(save_recipe),
        )
        .route(
            &format!("{}/favorites", root_path),
            get(get_favorites).post(create_favorite),
        )
        .route(
            &format!("{}/favorites/{{favorite_id}}", root_path),
            get(get_favorite).put(update_favorite).delete(delete_favorite),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
