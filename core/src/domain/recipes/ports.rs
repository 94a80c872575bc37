use std::future::Future;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipes::{
        entities::{RecipeSource, SavedRecipe},
        value_objects::ProviderSearchQuery,
    },
};

/// Recipe-search provider (Spoonacular-shaped HTTP/JSON API).
///
/// Contract: a missing API key yields `Ok` with empty payloads so every
/// dependent feature degrades instead of crashing; transport and non-2xx
/// failures surface as `ExternalServiceError` for the service layer to
/// absorb.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeSearchClient: Send + Sync {
    /// Main search endpoint; returns the raw `results` array.
    fn search(
        &self,
        query: ProviderSearchQuery,
    ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send;

    /// Ingredient-based search; returns raw match items carrying
    /// `usedIngredients` / `missedIngredients`.
    fn find_by_ingredients(
        &self,
        ingredients: Vec<String>,
        number: u32,
    ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send;

    /// Bulk detail fetch for a set of provider ids.
    fn information_bulk(
        &self,
        ids: Vec<String>,
    ) -> impl Future<Output = Result<Vec<Value>, CoreError>> + Send;

    /// Single-recipe detail including nutrition, for macro prefill.
    fn information(
        &self,
        id: String,
    ) -> impl Future<Output = Result<Option<Value>, CoreError>> + Send;

    /// Nutrition guess by title, for AI recipes without a provider id.
    fn guess_nutrition(
        &self,
        title: String,
    ) -> impl Future<Output = Result<Option<Value>, CoreError>> + Send;

    /// Representative thumbnail URL for a dish title.
    fn image_for_title(
        &self,
        title: String,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    /// Download an image so it can be cached in object storage. `Ok(None)`
    /// when the URL is unreachable or does not hold an image.
    fn fetch_image(
        &self,
        url: String,
    ) -> impl Future<Output = Result<Option<bytes::Bytes>, CoreError>> + Send;
}

/// Generative AI provider: recipe-text generation, pantry-photo vision
/// extraction and (feature-flagged) image generation.
#[cfg_attr(test, mockall::automock)]
pub trait GenerativeClient: Send + Sync {
    /// Chat completion requesting strict JSON; returns the raw model
    /// text for the normalizer to salvage.
    fn generate_text(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Vision call with the image inlined as base64.
    fn generate_with_image_bytes(
        &self,
        system_prompt: String,
        user_prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Vision call passing a reachable image URL instead of inline data.
    fn generate_with_image_url(
        &self,
        system_prompt: String,
        user_prompt: String,
        image_url: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Image generation; `Ok(None)` when the feature is disabled or the
    /// provider refuses.
    fn generate_image(
        &self,
        prompt: String,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait SavedRecipeRepository: Send + Sync {
    fn create(
        &self,
        recipe: SavedRecipe,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn get_by_key(
        &self,
        user_id: Uuid,
        source: RecipeSource,
        external_id: String,
    ) -> impl Future<Output = Result<Option<SavedRecipe>, CoreError>> + Send;

    fn get_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<SavedRecipe>, CoreError>> + Send;

    fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<SavedRecipe>, CoreError>> + Send;

    fn update(
        &self,
        recipe: SavedRecipe,
    ) -> impl Future<Output = Result<SavedRecipe, CoreError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
