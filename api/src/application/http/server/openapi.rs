use crate::application::http::{
    extraction::router::ExtractionApiDoc, health::router::HealthApiDoc,
    mealplan::router::MealPlanApiDoc, nutrition::router::NutritionApiDoc,
    pantry::router::PantryApiDoc, recipes::router::RecipesApiDoc,
};
use utoipa::OpenApi;

const ROOT: &str = "";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Pantry API"
    ),
    nest(
        (path = ROOT, api = PantryApiDoc),
        (path = ROOT, api = ExtractionApiDoc),
        (path = ROOT, api = RecipesApiDoc),
        (path = ROOT, api = MealPlanApiDoc),
        (path = ROOT, api = NutritionApiDoc),
        (path = ROOT, api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
