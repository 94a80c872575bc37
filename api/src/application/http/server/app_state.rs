use std::sync::Arc;

use smartpantry_core::{
    domain::{
        extraction::services::ExtractionService,
        health::services::HealthCheckService,
        mealplan::services::MealPlanService,
        nutrition::services::NutritionService,
        pantry::services::PantryService,
        recipes::services::RecipeService,
    },
    infrastructure::{
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

use crate::args::Args;

pub type PantrySvc = PantryService<PostgresIngredientRepository>;
pub type RecipeSvc = RecipeService<
    SpoonacularClient,
    OpenAiClient,
    InMemorySearchResultCache,
    PostgresSavedRecipeRepository,
    S3ObjectStorage,
>;
pub type ExtractionSvc = ExtractionService<
    TesseractOcr,
    OpenAiClient,
    PostgresPantryUploadRepository,
    S3ObjectStorage,
>;
pub type MealPlanSvc = MealPlanService<PostgresMealPlanRepository, PostgresSavedRecipeRepository>;
pub type NutritionSvc = NutritionService<
    PostgresNutritionTargetRepository,
    PostgresLoggedMealRepository,
    PostgresMealPlanRepository,
    PostgresSavedRecipeRepository,
    SpoonacularClient,
    InMemorySearchResultCache,
>;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub pantry_service: Arc<PantrySvc>,
    pub recipe_service: Arc<RecipeSvc>,
    pub extraction_service: Arc<ExtractionSvc>,
    pub meal_plan_service: Arc<MealPlanSvc>,
    pub nutrition_service: Arc<NutritionSvc>,
    pub health_service: Arc<HealthCheckService>,
    pub user_repository: Arc<PostgresUserRepository>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        args: Arc<Args>,
        pantry_service: PantrySvc,
        recipe_service: RecipeSvc,
        extraction_service: ExtractionSvc,
        meal_plan_service: MealPlanSvc,
        nutrition_service: NutritionSvc,
        health_service: HealthCheckService,
        user_repository: PostgresUserRepository,
    ) -> Self {
        Self {
            args,
            pantry_service: Arc::new(pantry_service),
            recipe_service: Arc::new(recipe_service),
            extraction_service: Arc::new(extraction_service),
            meal_plan_service: Arc::new(meal_plan_service),
            nutrition_service: Arc::new(nutrition_service),
            health_service: Arc::new(health_service),
            user_repository: Arc::new(user_repository),
        }
    }
}
