use serde::Deserialize;
use smartpantry_core::domain::recipes::{
    entities::RecipeSource, value_objects::RecipeKind,
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SearchRecipesValidator {
    /// Pantry ingredient ids to cook from; empty means the whole pantry.
    #[serde(default)]
    #[validate(length(max = 200, message = "at most 200 ingredients per search"))]
    pub ingredient_ids: Vec<Uuid>,
    #[serde(default)]
    pub kind: RecipeKind,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFavoriteValidator {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    /// Defaults to "ai" when omitted.
    pub source: Option<RecipeSource>,
    #[validate(length(max = 100, message = "external_id must be at most 100 characters"))]
    pub external_id: Option<String>,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    pub nutrition: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFavoriteValidator {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "image_url must be at most 500 characters"))]
    pub image_url: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
}
