use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;

use crate::domain::{
    common::{entities::app_errors::CoreError, RecipeApiConfig},
    recipes::{ports::RecipeSearchClient, value_objects::ProviderSearchQuery},
};

/// Search and bulk-detail calls.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(12);
/// Single-record lookups (detail, nutrition guess).
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(6);
/// Thumbnail downloads.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Spoonacular HTTP client. A missing API key turns every call into an
/// empty success so the app keeps working without the provider.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    config: RecipeApiConfig,
    client: Client,
}

impl SpoonacularClient {
    pub fn new(config: RecipeApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn has_key(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    async fn get_json(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
        timeout: Duration,
    ) -> Result<Value, CoreError> {
        params.push(("apiKey", self.config.api_key.clone()));
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path = %path, "recipe API request failed: {}", e);
                CoreError::ExternalServiceError(format!("recipe API error: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, "recipe API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "recipe API returned error: {status}"
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(path = %path, "failed to parse recipe API response: {}", e);
            CoreError::ExternalServiceError(format!("failed to parse recipe API response: {e}"))
        })
    }
}

fn as_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

impl RecipeSearchClient for SpoonacularClient {
    async fn search(&self, query: ProviderSearchQuery) -> Result<Vec<Value>, CoreError> {
        if !self.has_key() {
            return Ok(Vec::new());
        }

        let mut params: Vec<(&'static str, String)> =
            vec![("number", query.number.max(1).to_string())];
        if let Some(q) = query.query.filter(|q| !q.trim().is_empty()) {
            params.push(("query", q));
        }
        if !query.include_ingredients.is_empty() {
            params.push(("includeIngredients", query.include_ingredients.join(",")));
        }
        if query.add_recipe_information {
            params.push(("addRecipeInformation", "true".to_string()));
        }
        if query.add_recipe_nutrition {
            params.push(("addRecipeNutrition", "true".to_string()));
        }
        if query.instructions_required {
            params.push(("instructionsRequired", "true".to_string()));
        }
        if let Some(min_protein) = query.min_protein {
            params.push(("minProtein", min_protein.to_string()));
        }
        if let Some(max_calories) = query.max_calories {
            params.push(("maxCalories", max_calories.to_string()));
        }

        let body = self.get_json("/recipes/complexSearch", params, SEARCH_TIMEOUT).await?;
        Ok(as_array(body.get("results").cloned().unwrap_or_default()))
    }

    async fn find_by_ingredients(
        &self,
        ingredients: Vec<String>,
        number: u32,
    ) -> Result<Vec<Value>, CoreError> {
        if !self.has_key() || ingredients.is_empty() {
            return Ok(Vec::new());
        }

        let params = vec![
            ("ingredients", ingredients.join(",")),
            ("number", number.max(1).to_string()),
            ("ranking", "1".to_string()),
            ("ignorePantry", "true".to_string()),
        ];
        let body = self.get_json("/recipes/findByIngredients", params, SEARCH_TIMEOUT).await?;
        Ok(as_array(body))
    }

    async fn information_bulk(&self, ids: Vec<String>) -> Result<Vec<Value>, CoreError> {
        if !self.has_key() || ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = vec![
            ("ids", ids.join(",")),
            ("includeNutrition", "true".to_string()),
        ];
        let body = self.get_json("/recipes/informationBulk", params, SEARCH_TIMEOUT).await?;
        Ok(as_array(body))
    }

    async fn information(&self, id: String) -> Result<Option<Value>, CoreError> {
        if !self.has_key() {
            return Ok(None);
        }

        let path = format!("/recipes/{id}/information");
        let params = vec![("includeNutrition", "true".to_string())];
        match self.get_json(&path, params, LOOKUP_TIMEOUT).await {
            Ok(body) if body.is_object() => Ok(Some(body)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(recipe_id = %id, "recipe detail lookup failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn guess_nutrition(&self, title: String) -> Result<Option<Value>, CoreError> {
        if !self.has_key() || title.trim().is_empty() {
            return Ok(None);
        }

        let params = vec![("title", title)];
        match self.get_json("/recipes/guessNutrition", params, LOOKUP_TIMEOUT).await {
            Ok(body) if body.is_object() => Ok(Some(body)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("nutrition guess failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn image_for_title(&self, title: String) -> Result<Option<String>, CoreError> {
        if !self.has_key() || title.trim().is_empty() {
            return Ok(None);
        }

        let params = vec![("query", title), ("number", "1".to_string())];
        let body = match self.get_json("/recipes/complexSearch", params, SEARCH_TIMEOUT).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("image lookup failed: {}", e);
                return Ok(None);
            }
        };

        Ok(body
            .get("results")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| item.get("image"))
            .and_then(Value::as_str)
            .map(String::from))
    }

    async fn fetch_image(&self, url: String) -> Result<Option<Bytes>, CoreError> {
        let response = match self.client.get(&url).timeout(IMAGE_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, "image download failed: {}", e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            return Ok(None);
        }
        let is_image = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Ok(None);
        }

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Ok(Some(bytes)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(url = %url, "image body read failed: {}", e);
                Ok(None)
            }
        }
    }
}
