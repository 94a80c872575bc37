use std::sync::Arc;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use smartpantry_core::{
    domain::{
        common::SmartPantryConfig,
        extraction::services::ExtractionService,
        health::services::HealthCheckService,
        mealplan::services::MealPlanService,
        nutrition::services::NutritionService,
        pantry::services::PantryService,
        recipes::services::RecipeService,
    },
    infrastructure::{
        db,
        extraction::repositories::pantry_upload_repository::PostgresPantryUploadRepository,
        llm::openai_client::OpenAiClient,
        mealplan::repositories::meal_plan_repository::PostgresMealPlanRepository,
        nutrition::repositories::{
            logged_meal_repository::PostgresLoggedMealRepository,
            nutrition_target_repository::PostgresNutritionTargetRepository,
        },
        object_storage::s3::S3ObjectStorage,
        ocr::tesseract::TesseractOcr,
        pantry::repositories::ingredient_repository::PostgresIngredientRepository,
        recipes::{
            repositories::saved_recipe_repository::PostgresSavedRecipeRepository,
            spoonacular_client::SpoonacularClient,
        },
        session::memory::InMemorySearchResultCache,
        user::repositories::user_repository::PostgresUserRepository,
    },
};
use tower_http::cors::CorsLayer;
use tracing::info_span;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::{
    extraction::router::extraction_routes, health::router::health_routes,
    mealplan::router::mealplan_routes, nutrition::router::nutrition_routes,
    pantry::router::pantry_routes, recipes::router::recipe_routes,
};
use crate::application::http::server::{app_state::AppState, openapi::ApiDoc};
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = SmartPantryConfig::from(args.as_ref().clone());

    let database = db::postgres::connect(&config.database).await?;

    let provider = SpoonacularClient::new(config.recipe_api.clone());
    let generative = OpenAiClient::new(config.llm.clone());
    let ocr = TesseractOcr::new(config.ocr.clone());
    let object_storage = S3ObjectStorage::new(config.object_storage.clone()).await;
    let cache = InMemorySearchResultCache::new(config.session.clone());

    let ingredient_repository = PostgresIngredientRepository::new(database.clone());
    let saved_recipe_repository = PostgresSavedRecipeRepository::new(database.clone());
    let upload_repository = PostgresPantryUploadRepository::new(database.clone());
    let plan_repository = PostgresMealPlanRepository::new(database.clone());
    let target_repository = PostgresNutritionTargetRepository::new(database.clone());
    let logged_repository = PostgresLoggedMealRepository::new(database.clone());
    let user_repository = PostgresUserRepository::new(database.clone());

    let pantry_service = PantryService::new(ingredient_repository);
    let recipe_service = RecipeService::new(
        provider.clone(),
        generative.clone(),
        cache.clone(),
        saved_recipe_repository.clone(),
        object_storage.clone(),
        config.matching.clone(),
    );
    let extraction_service = ExtractionService::new(
        ocr,
        generative,
        upload_repository,
        object_storage,
    );
    let meal_plan_service =
        MealPlanService::new(plan_repository.clone(), saved_recipe_repository.clone());
    let nutrition_service = NutritionService::new(
        target_repository,
        logged_repository,
        MealPlanService::new(plan_repository, saved_recipe_repository),
        provider,
        cache,
    );
    let health_service = HealthCheckService::new(database);

    Ok(AppState::new(
        args,
        pantry_service,
        recipe_service,
        extraction_service,
        meal_plan_service,
        nutrition_service,
        health_service,
        user_repository,
    ))
}

/// Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<HeaderValue>>();

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            LOCATION,
        ])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(pantry_routes(state.clone()))
        .merge(extraction_routes(state.clone()))
        .merge(recipe_routes(state.clone()))
        .merge(mealplan_routes(state.clone()))
        .merge(nutrition_routes(state.clone()))
        .merge(health_routes(state.clone()))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}
