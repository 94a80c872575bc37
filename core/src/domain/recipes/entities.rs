use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecipeSource {
    Ai,
    Web,
}

impl RecipeSource {
    pub fn as_str(&self) -> &str {
        match self {
            RecipeSource::Ai => "ai",
            RecipeSource::Web => "web",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ai" => Some(RecipeSource::Ai),
            "web" => Some(RecipeSource::Web),
            _ => None,
        }
    }
}

/// The one normalized shape every provider payload is converted into.
/// `id` is the provider id for web results and a deterministic slug for
/// AI results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeRecord {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub source: RecipeSource,
    pub calories: Option<i32>,
    pub protein_g: Option<i32>,
    pub ready_in_minutes: Option<i32>,
    pub servings: Option<i32>,
    /// Pantry items confirmed present in this recipe (web results only).
    pub used_ingredients: Vec<String>,
    /// Provider-reported missing ingredients not covered by the pantry.
    pub missed_ingredients: Vec<String>,
}

impl Default for RecipeRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            image: None,
            summary: None,
            url: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            source: RecipeSource::Web,
            calories: None,
            protein_g: None,
            ready_in_minutes: None,
            servings: None,
            used_ingredients: Vec::new(),
            missed_ingredients: Vec::new(),
        }
    }
}

/// A recipe saved to favorites. (user_id, source, external_id) is the
/// de-duplication key; AI recipes without a stable id get a generated
/// UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavedRecipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: RecipeSource,
    pub external_id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub nutrition: Value,
    pub created_at: DateTime<Utc>,
}

impl SavedRecipe {
    pub fn new(
        user_id: Uuid,
        source: RecipeSource,
        external_id: String,
        title: String,
        image_url: Option<String>,
        ingredients: Vec<String>,
        steps: Vec<String>,
        nutrition: Value,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();
        let external_id = if external_id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            external_id
        };
        let mut title = title;
        title.truncate(200);

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            source,
            external_id,
            title,
            image_url,
            ingredients,
            steps,
            nutrition,
            created_at: now,
        }
    }
}
