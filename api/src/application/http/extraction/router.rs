use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;

use super::handlers::{
    extract_pantry_image::{__path_extract_pantry_image, extract_pantry_image},
    get_upload::{__path_get_upload, get_upload},
    get_uploads::{__path_get_uploads, get_uploads},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(extract_pantry_image, get_upload, get_uploads))]
pub struct ExtractionApiDoc;

pub fn extraction_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    Router::new()
        .route(
            &format!("{}/pantry/extract", root_path),
            post(extract_pantry_image),
        )
        .route(
            &format!("{}/pantry/extract/{{upload_id}}", root_path),
            get(get_upload),
        )
        .route(&format!("{}/pantry/uploads", root_path), get(get_uploads))
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
