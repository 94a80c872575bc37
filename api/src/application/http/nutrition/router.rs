use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;

use super::handlers::{
    delete_log::{__path_delete_log, delete_log},
    delete_target::{__path_delete_target, delete_target},
    get_overview::{__path_get_overview, get_overview},
    log_recipe::{__path_log_recipe, log_recipe},
    put_target::{__path_put_target, put_target},
    quick_log::{__path_quick_log, quick_log},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    get_overview,
    put_target,
    delete_target,
    quick_log,
    log_recipe,
    delete_log
))]
pub struct NutritionApiDoc;

pub fn nutrition_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(
            &format!("{}/nutrition/target", root_path),
            get(get_overview).put(put_target).delete(delete_target),
        )
        .route(&format!("{}/nutrition/log", root_path), post(quick_log))
        .route(
            &format!("{}/nutrition/log/{{source}}/{{id}}", root_path),
            post(log_recipe),
        )
        .route(
            &format!("{}/nutrition/logs/{{log_id}}", root_path),
            delete(delete_log),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
