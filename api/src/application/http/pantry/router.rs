use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use super::handlers::{
    create_ingredient::{__path_create_ingredient, create_ingredient},
    delete_ingredient::{__path_delete_ingredient, delete_ingredient},
    get_ingredients::{__path_get_ingredients, get_ingredients},
    submit_review::{__path_submit_review, submit_review},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_ingredients, create_ingredient, delete_ingredient, submit_review))]
pub struct PantryApiDoc;

pub fn pantry_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(
            &format!("{}/pantry/ingredients", root_path),
            get(get_ingredients).post(create_ingredient),
        )
        .route(
            &format!("{}/pantry/ingredients/{{ingredient_id}}", root_path),
            axum::routing::delete(delete_ingredient),
        )
        .route(
            &format!("{}/pantry/review/{{upload_id}}", root_path),
            post(submit_review),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
