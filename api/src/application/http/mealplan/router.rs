use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;

use super::handlers::{
    delete_meal::{__path_delete_meal, delete_meal},
    get_week::{__path_get_week, get_week},
    schedule_meal::{__path_schedule_meal, schedule_meal},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_week, schedule_meal, delete_meal))]
pub struct MealPlanApiDoc;

pub fn mealplan_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(&format!("{}/mealplan", root_path), get(get_week))
        .route(&format!("{}/mealplan/meals", root_path), post(schedule_meal))
        .route(
            &format!("{}/mealplan/meals/{{meal_id}}", root_path),
            delete(delete_meal),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
