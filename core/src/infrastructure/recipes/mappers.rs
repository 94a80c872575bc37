use serde_json::Value;

use crate::{
    domain::recipes::entities::{RecipeSource, SavedRecipe},
    entity::saved_recipes,
};

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

impl From<&saved_recipes::Model> for SavedRecipe {
    fn from(model: &saved_recipes::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            // Unknown source strings cannot occur through the repository;
            // fall back to web rather than panic on hand-edited rows.
            source: RecipeSource::parse(&model.source).unwrap_or(RecipeSource::Web),
            external_id: model.external_id.clone(),
            title: model.title.clone(),
            image_url: model.image_url.clone(),
            ingredients: string_list(&model.ingredients),
            steps: string_list(&model.steps),
            nutrition: model.nutrition.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<saved_recipes::Model> for SavedRecipe {
    fn from(model: saved_recipes::Model) -> Self {
        Self::from(&model)
    }
}

pub fn json_string_list(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
}
