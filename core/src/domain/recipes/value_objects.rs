use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{recipes::entities::RecipeSource, session::entities::SearchResultBundle};

/// What kind of recipes the user asked for; drinks are filtered from
/// food searches and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    Food,
    Drink,
}

impl Default for RecipeKind {
    fn default() -> Self {
        RecipeKind::Food
    }
}

impl RecipeKind {
    pub fn as_str(&self) -> &str {
        match self {
            RecipeKind::Food => "food",
            RecipeKind::Drink => "drink",
        }
    }
}

/// Dish-type tags the provider uses that mark a result as a drink.
pub const DRINK_TYPES: &[&str] = &["drink", "beverage", "beverages", "cocktail", "smoothie"];

#[derive(Debug, Clone)]
pub struct SearchInput {
    pub session_id: String,
    /// Selected pantry item names; empty means "use the whole pantry"
    /// (resolved by the caller before reaching the service).
    pub pantry_names: Vec<String>,
    pub kind: RecipeKind,
}

/// Search never fails outright: upstream trouble shows up as a notice
/// next to whatever results the other provider produced.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SearchOutcome {
    pub bundle: SearchResultBundle,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Created,
    Updated,
    AlreadyExists,
}

/// A favorite entered by hand rather than saved from search results.
/// Source defaults to AI; a blank external id gets a generated one.
#[derive(Debug, Clone, Default)]
pub struct CreateFavoriteInput {
    pub title: String,
    pub source: Option<RecipeSource>,
    pub external_id: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub nutrition: Option<Value>,
}

/// Favorite edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateFavoriteInput {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
}

/// Parameters for the provider's main search endpoint. Only the fields a
/// given flow needs are set; the client omits empty ones.
#[derive(Debug, Clone, Default)]
pub struct ProviderSearchQuery {
    pub query: Option<String>,
    pub include_ingredients: Vec<String>,
    pub number: u32,
    pub add_recipe_information: bool,
    pub add_recipe_nutrition: bool,
    pub instructions_required: bool,
    pub min_protein: Option<u32>,
    pub max_calories: Option<u32>,
}
