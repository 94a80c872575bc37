use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, MatchingConfig},
    pantry::matcher::is_match,
    recipes::{
        entities::{RecipeRecord, RecipeSource, SavedRecipe},
        normalize::{
            extract_protein_and_calories, generated_recipes_from_text,
            ingredients_from_information, steps_from_information,
        },
        ports::{GenerativeClient, RecipeSearchClient, SavedRecipeRepository},
        steps::fallback_steps_for_title,
        value_objects::{
            CreateFavoriteInput, RecipeKind, SaveOutcome, SearchInput, SearchOutcome,
            UpdateFavoriteInput, DRINK_TYPES,
        },
    },
    session::{entities::SearchResultBundle, ports::SearchResultCache},
    storage::ports::ObjectStoragePort,
    user::value_objects::Identity,
};

/// How many ingredient-search matches to request from the provider.
const WEB_MATCH_FETCH: u32 = 12;
/// Cap on ids sent to the bulk detail endpoint.
const MAX_DETAIL_IDS: usize = 12;
/// Cap on AI-generated recipes kept per search.
const AI_RESULT_CAP: usize = 4;
/// Thumbnail lookups per results render, to bound provider calls.
const IMAGE_BACKFILL_CAP: usize = 6;

const AI_SYSTEM_PROMPT: &str = "You are a culinary assistant. Respond with strict JSON only: \
an object with a \"recipes\" array where each entry has \"title\", \"summary\", \
\"ingredients\" (list of strings) and \"steps\" (list of strings). No prose outside the JSON.";

fn ai_user_prompt(pantry_names: &[String], kind: RecipeKind) -> String {
    let wanted = match kind {
        RecipeKind::Food => "dishes",
        RecipeKind::Drink => "drinks",
    };
    format!(
        "Suggest up to {} {} I can make mostly from these pantry items: {}. \
Prefer recipes that need few extra ingredients.",
        AI_RESULT_CAP,
        wanted,
        pantry_names.join(", ")
    )
}

fn ingredient_names(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|i| i.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn is_drink(det: &Value) -> bool {
    det.get("dishTypes")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .any(|t| DRINK_TYPES.contains(&t.to_lowercase().as_str()))
}

/// Unified pantry-driven search over the web recipe provider and the
/// generative model, plus the favorites lifecycle. Results live in the
/// per-session cache; favorites are durable.
#[derive(Debug, Clone)]
pub struct RecipeService<P, G, C, S, O>
where
    P: RecipeSearchClient,
    G: GenerativeClient,
    C: SearchResultCache,
    S: SavedRecipeRepository,
    O: ObjectStoragePort,
{
    provider: P,
    generative: G,
    cache: C,
    saved_repository: S,
    object_storage: O,
    matching: MatchingConfig,
}

impl<P, G, C, S, O> RecipeService<P, G, C, S, O>
where
    P: RecipeSearchClient,
    G: GenerativeClient,
    C: SearchResultCache,
    S: SavedRecipeRepository,
    O: ObjectStoragePort,
{
    pub fn new(
        provider: P,
        generative: G,
        cache: C,
        saved_repository: S,
        object_storage: O,
        matching: MatchingConfig,
    ) -> Self {
        Self {
            provider,
            generative,
            cache,
            saved_repository,
            object_storage,
            matching,
        }
    }

    /// Run both providers, absorb per-provider failures into notices, and
    /// replace the session's cached bundle with whatever came back.
    pub async fn search(&self, input: SearchInput) -> Result<SearchOutcome, CoreError> {
        if input.pantry_names.is_empty() {
            return Err(CoreError::Invalid(
                "select at least one pantry item".into(),
            ));
        }

        let mut notices = Vec::new();

        let ai = match self.ai_recipes(&input.pantry_names, input.kind).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!("AI recipe generation failed: {}", e);
                notices.push("AI suggestions are unavailable right now.".to_string());
                Vec::new()
            }
        };

        let web = match self.web_recipes(&input.pantry_names, input.kind).await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!("web recipe search failed: {}", e);
                notices.push("Web recipe search is unavailable right now.".to_string());
                Vec::new()
            }
        };

        if ai.is_empty() && web.is_empty() && notices.is_empty() {
            notices.push("No recipes matched your pantry. Try selecting more items.".to_string());
        }

        let bundle = SearchResultBundle::new(ai, web);
        self.cache.store(input.session_id, bundle.clone()).await;

        Ok(SearchOutcome { bundle, notices })
    }

    async fn ai_recipes(
        &self,
        pantry_names: &[String],
        kind: RecipeKind,
    ) -> Result<Vec<RecipeRecord>, CoreError> {
        let text = self
            .generative
            .generate_text(AI_SYSTEM_PROMPT.to_string(), ai_user_prompt(pantry_names, kind))
            .await?;
        let mut recipes = generated_recipes_from_text(&text);
        recipes.truncate(AI_RESULT_CAP);
        Ok(recipes)
    }

    /// Ingredient search, threshold filter, bulk detail fetch, then
    /// confirmation matching of pantry names against recipe ingredients.
    async fn web_recipes(
        &self,
        pantry_names: &[String],
        kind: RecipeKind,
    ) -> Result<Vec<RecipeRecord>, CoreError> {
        let matches = self
            .provider
            .find_by_ingredients(pantry_names.to_vec(), WEB_MATCH_FETCH)
            .await?;

        let mut missed_by_id: HashMap<String, Vec<String>> = HashMap::new();
        let mut ids = Vec::new();
        for item in &matches {
            let Some(id) = item.get("id").and_then(Value::as_i64) else {
                continue;
            };
            let used = ingredient_names(item.get("usedIngredients"));
            if used.len() < self.matching.min_matched_api {
                continue;
            }
            let id = id.to_string();
            missed_by_id.insert(id.clone(), ingredient_names(item.get("missedIngredients")));
            ids.push(id);
            if ids.len() >= MAX_DETAIL_IDS {
                break;
            }
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let details = self.provider.information_bulk(ids).await?;

        let mut records = Vec::new();
        for det in &details {
            let Some(id) = det.get("id").and_then(Value::as_i64) else {
                continue;
            };
            let id = id.to_string();

            if is_drink(det) != matches!(kind, RecipeKind::Drink) {
                continue;
            }

            let ingredients = ingredients_from_information(det);
            let confirmed: Vec<String> = pantry_names
                .iter()
                .filter(|pantry| ingredients.iter().any(|c| is_match(pantry, c)))
                .cloned()
                .collect();
            if confirmed.len() < self.matching.min_confirmed {
                continue;
            }

            let (protein_g, calories) = extract_protein_and_calories(det);
            records.push(RecipeRecord {
                id: id.clone(),
                title: det
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("Untitled")
                    .to_string(),
                image: det.get("image").and_then(Value::as_str).map(str::to_string),
                summary: det
                    .get("summary")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                url: det
                    .get("sourceUrl")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                ingredients,
                steps: steps_from_information(det),
                source: RecipeSource::Web,
                calories: (calories > 0).then_some(calories),
                protein_g: (protein_g > 0).then_some(protein_g),
                ready_in_minutes: det
                    .get("readyInMinutes")
                    .and_then(Value::as_i64)
                    .map(|v| v as i32),
                servings: det.get("servings").and_then(Value::as_i64).map(|v| v as i32),
                used_ingredients: confirmed,
                missed_ingredients: missed_by_id.remove(&id).unwrap_or_default(),
            });
        }

        Ok(records)
    }

    /// The cached bundle for the session, with a best-effort thumbnail
    /// backfill for AI records that arrived without an image.
    pub async fn results(&self, session_id: &str) -> Option<SearchResultBundle> {
        let bundle = self.cache.bundle(session_id.to_string()).await?;

        let mut backfilled = 0;
        for record in bundle.ai.iter().filter(|r| r.image.is_none()) {
            if backfilled >= IMAGE_BACKFILL_CAP {
                break;
            }
            match self.provider.image_for_title(record.title.clone()).await {
                Ok(Some(url)) => {
                    self.cache
                        .attach_image(session_id.to_string(), record.id.clone(), url)
                        .await;
                    backfilled += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("image lookup for '{}' failed: {}", record.title, e);
                    break;
                }
            }
        }

        self.cache.bundle(session_id.to_string()).await
    }

    /// Detail view of a cached result. A miss means the session's results
    /// went stale, which callers surface as not-found.
    pub async fn detail(
        &self,
        session_id: &str,
        source: RecipeSource,
        id: &str,
    ) -> Result<RecipeRecord, CoreError> {
        let mut record = self
            .cache
            .lookup(session_id.to_string(), source, id.to_string())
            .await
            .ok_or(CoreError::NotFound)?;

        if record.image.is_none() {
            if let Some(url) = self.find_image_for(&record).await {
                let stored = self.cache_thumbnail(&url).await.unwrap_or(url);
                self.cache
                    .attach_image(session_id.to_string(), record.id.clone(), stored.clone())
                    .await;
                record.image = Some(stored);
            }
        }

        if record.steps.is_empty() && record.source == RecipeSource::Ai {
            record.steps = fallback_steps_for_title(&record.title);
        }

        Ok(record)
    }

    async fn find_image_for(&self, record: &RecipeRecord) -> Option<String> {
        match record.source {
            RecipeSource::Web => {
                let det = self.provider.information(record.id.clone()).await.ok()??;
                det.get("image").and_then(Value::as_str).map(str::to_string)
            }
            RecipeSource::Ai => {
                if let Ok(Some(url)) = self
                    .generative
                    .generate_image(format!("A photo of the dish: {}", record.title))
                    .await
                {
                    return Some(url);
                }
                self.provider
                    .image_for_title(record.title.clone())
                    .await
                    .ok()
                    .flatten()
            }
        }
    }

    /// Copy a provider-hosted thumbnail into our object storage so it
    /// outlives the provider's URL. Falls back to the original URL.
    async fn cache_thumbnail(&self, url: &str) -> Option<String> {
        let payload = self.provider.fetch_image(url.to_string()).await.ok().flatten()?;
        let key = format!("recipe_images/{}.jpg", Uuid::new_v4());
        match self
            .object_storage
            .put_object(key, payload, "image/jpeg".to_string())
            .await
        {
            Ok(stored) => Some(self.object_storage.object_url(&stored)),
            Err(e) => {
                tracing::warn!("could not cache thumbnail: {}", e);
                None
            }
        }
    }

    /// Idempotent on (user, source, external_id): re-saving an existing
    /// favorite only fills in fields that were empty the first time.
    pub async fn save_favorite(
        &self,
        identity: &Identity,
        session_id: &str,
        source: RecipeSource,
        id: &str,
    ) -> Result<SaveOutcome, CoreError> {
        let record = self
            .cache
            .lookup(session_id.to_string(), source, id.to_string())
            .await
            .ok_or(CoreError::NotFound)?;

        if let Some(mut existing) = self
            .saved_repository
            .get_by_key(identity.id(), source, record.id.clone())
            .await?
        {
            let mut changed = false;
            if existing.image_url.is_none() && record.image.is_some() {
                existing.image_url = record.image.clone();
                changed = true;
            }
            if existing.ingredients.is_empty() && !record.ingredients.is_empty() {
                existing.ingredients = record.ingredients.clone();
                changed = true;
            }
            if existing.steps.is_empty() && !record.steps.is_empty() {
                existing.steps = record.steps.clone();
                changed = true;
            }
            if changed {
                self.saved_repository.update(existing).await?;
                return Ok(SaveOutcome::Updated);
            }
            return Ok(SaveOutcome::AlreadyExists);
        }

        let steps = if record.steps.is_empty() && record.source == RecipeSource::Ai {
            fallback_steps_for_title(&record.title)
        } else {
            record.steps.clone()
        };
        let nutrition = serde_json::json!({
            "calories": record.calories,
            "protein_g": record.protein_g,
        });
        let saved = SavedRecipe::new(
            identity.id(),
            source,
            record.id.clone(),
            record.title.clone(),
            record.image.clone(),
            record.ingredients.clone(),
            steps,
            nutrition,
        );

        // A concurrent save can win the race; the unique key makes that a
        // duplicate, not an error.
        match self.saved_repository.create(saved).await {
            Ok(_) => Ok(SaveOutcome::Created),
            Err(CoreError::AlreadyExists(_)) => Ok(SaveOutcome::AlreadyExists),
            Err(e) => Err(e),
        }
    }

    /// Favorite entered by hand, for recipes that never came from a
    /// search. A caller-supplied external id that collides with an
    /// existing favorite surfaces as a conflict.
    pub async fn create_favorite(
        &self,
        identity: &Identity,
        input: CreateFavoriteInput,
    ) -> Result<SavedRecipe, CoreError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::Invalid("title cannot be empty".to_string()));
        }

        let saved = SavedRecipe::new(
            identity.id(),
            input.source.unwrap_or(RecipeSource::Ai),
            input.external_id.unwrap_or_default(),
            title,
            input.image_url.filter(|u| !u.trim().is_empty()),
            input.ingredients,
            input.steps,
            input.nutrition.unwrap_or_else(|| serde_json::json!({})),
        );
        self.saved_repository.create(saved).await
    }

    pub async fn favorites(&self, identity: &Identity) -> Result<Vec<SavedRecipe>, CoreError> {
        self.saved_repository.list_by_user(identity.id()).await
    }

    pub async fn favorite(&self, identity: &Identity, id: Uuid) -> Result<SavedRecipe, CoreError> {
        self.saved_repository
            .get_by_id(id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    pub async fn update_favorite(
        &self,
        identity: &Identity,
        id: Uuid,
        input: UpdateFavoriteInput,
    ) -> Result<SavedRecipe, CoreError> {
        let mut favorite = self.favorite(identity, id).await?;

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(CoreError::Invalid("title cannot be empty".to_string()));
            }
            favorite.title = title;
            favorite.title.truncate(200);
        }
        if let Some(image_url) = input.image_url {
            favorite.image_url = Some(image_url).filter(|u| !u.trim().is_empty());
        }
        if let Some(ingredients) = input.ingredients {
            favorite.ingredients = ingredients;
        }
        if let Some(steps) = input.steps {
            favorite.steps = steps;
        }

        self.saved_repository.update(favorite).await
    }

    pub async fn delete_favorite(&self, identity: &Identity, id: Uuid) -> Result<(), CoreError> {
        self.saved_repository
            .get_by_id(id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)?;
        self.saved_repository.delete(id, identity.id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipes::value_objects::ProviderSearchQuery;
    use serde_json::json;
    use std::sync::Mutex;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "tester".into(),
        }
    }

    #[derive(Default)]
    struct FakeProvider {
        // None means the call fails.
        find_items: Option<Vec<Value>>,
        details: Vec<Value>,
        image_url: Option<String>,
    }

    impl RecipeSearchClient for FakeProvider {
        async fn search(&self, _query: ProviderSearchQuery) -> Result<Vec<Value>, CoreError> {
            Ok(Vec::new())
        }

        async fn find_by_ingredients(
            &self,
            _ingredients: Vec<String>,
            _number: u32,
        ) -> Result<Vec<Value>, CoreError> {
            self.find_items
                .clone()
                .ok_or_else(|| CoreError::ExternalServiceError("provider down".into()))
        }

        async fn information_bulk(&self, _ids: Vec<String>) -> Result<Vec<Value>, CoreError> {
            Ok(self.details.clone())
        }

        async fn information(&self, _id: String) -> Result<Option<Value>, CoreError> {
            Ok(None)
        }

        async fn guess_nutrition(&self, _title: String) -> Result<Option<Value>, CoreError> {
            Ok(None)
        }

        async fn image_for_title(&self, _title: String) -> Result<Option<String>, CoreError> {
            Ok(self.image_url.clone())
        }

        async fn fetch_image(&self, _url: String) -> Result<Option<bytes::Bytes>, CoreError> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct FakeGenerative {
        text: String,
    }

    impl GenerativeClient for FakeGenerative {
        async fn generate_text(
            &self,
            _system_prompt: String,
            _user_prompt: String,
        ) -> Result<String, CoreError> {
            if self.text.is_empty() {
                Err(CoreError::ExternalServiceError("model down".into()))
            } else {
                Ok(self.text.clone())
            }
        }

        async fn generate_with_image_bytes(
            &self,
            _system_prompt: String,
            _user_prompt: String,
            _image_data: Vec<u8>,
            _mime_type: String,
        ) -> Result<String, CoreError> {
            Ok(String::new())
        }

        async fn generate_with_image_url(
            &self,
            _system_prompt: String,
            _user_prompt: String,
            _image_url: String,
        ) -> Result<String, CoreError> {
            Ok(String::new())
        }

        async fn generate_image(&self, _prompt: String) -> Result<Option<String>, CoreError> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct FakeCache {
        bundles: Mutex<HashMap<String, SearchResultBundle>>,
    }

    impl SearchResultCache for FakeCache {
        async fn store(&self, session_id: String, bundle: SearchResultBundle) {
            self.bundles.lock().unwrap().insert(session_id, bundle);
        }

        async fn bundle(&self, session_id: String) -> Option<SearchResultBundle> {
            self.bundles.lock().unwrap().get(&session_id).cloned()
        }

        async fn lookup(
            &self,
            session_id: String,
            source: RecipeSource,
            id: String,
        ) -> Option<RecipeRecord> {
            self.bundles
                .lock()
                .unwrap()
                .get(&session_id)?
                .list_for(source)
                .iter()
                .find(|r| r.id == id)
                .cloned()
        }

        async fn attach_image(&self, session_id: String, id: String, image_url: String) {
            if let Some(bundle) = self.bundles.lock().unwrap().get_mut(&session_id) {
                for record in bundle
                    .ai
                    .iter_mut()
                    .chain(bundle.web.iter_mut())
                    .chain(bundle.combined.iter_mut())
                {
                    if record.id == id {
                        record.image = Some(image_url.clone());
                    }
                }
            }
        }

        async fn stash_web_items(&self, session_id: String, items: Vec<RecipeRecord>) {
            let mut bundles = self.bundles.lock().unwrap();
            let existing = bundles.remove(&session_id).unwrap_or_default();
            let mut web = existing.web;
            for item in items {
                if !web.iter().any(|r| r.id == item.id) {
                    web.push(item);
                }
            }
            bundles.insert(session_id, SearchResultBundle::new(existing.ai, web));
        }
    }

    #[derive(Default)]
    struct FakeSavedRepository {
        rows: Mutex<Vec<SavedRecipe>>,
    }

    impl SavedRecipeRepository for FakeSavedRepository {
        async fn create(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|r| {
                r.user_id == recipe.user_id
                    && r.source == recipe.source
                    && r.external_id == recipe.external_id
            }) {
                return Err(CoreError::AlreadyExists(recipe.external_id));
            }
            rows.push(recipe.clone());
            Ok(recipe)
        }

        async fn get_by_key(
            &self,
            user_id: Uuid,
            source: RecipeSource,
            external_id: String,
        ) -> Result<Option<SavedRecipe>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| {
                    r.user_id == user_id && r.source == source && r.external_id == external_id
                })
                .cloned())
        }

        async fn get_by_id(
            &self,
            id: Uuid,
            user_id: Uuid,
        ) -> Result<Option<SavedRecipe>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id && r.user_id == user_id)
                .cloned())
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SavedRecipe>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn update(&self, recipe: SavedRecipe) -> Result<SavedRecipe, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows.iter_mut().find(|r| r.id == recipe.id) {
                *existing = recipe.clone();
            }
            Ok(recipe)
        }

        async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), CoreError> {
            self.rows
                .lock()
                .unwrap()
                .retain(|r| !(r.id == id && r.user_id == user_id));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeStorage;

    impl ObjectStoragePort for FakeStorage {
        async fn put_object(
            &self,
            object_key: String,
            _payload: bytes::Bytes,
            _content_type: String,
        ) -> Result<String, CoreError> {
            Ok(object_key)
        }

        async fn get_object(&self, _object_key: String) -> Result<bytes::Bytes, CoreError> {
            Ok(bytes::Bytes::new())
        }

        fn object_url(&self, object_key: &str) -> String {
            format!("http://storage.local/{object_key}")
        }
    }

    type TestService =
        RecipeService<FakeProvider, FakeGenerative, FakeCache, FakeSavedRepository, FakeStorage>;

    fn service(provider: FakeProvider, generative: FakeGenerative) -> TestService {
        RecipeService::new(
            provider,
            generative,
            FakeCache::default(),
            FakeSavedRepository::default(),
            FakeStorage,
            MatchingConfig::default(),
        )
    }

    fn ai_payload() -> String {
        json!({
            "recipes": [
                {"title": "Corn Salad", "ingredients": ["corn"], "steps": ["Mix."]},
            ]
        })
        .to_string()
    }

    fn search_input(session_id: &str, names: &[&str]) -> SearchInput {
        SearchInput {
            session_id: session_id.into(),
            pantry_names: names.iter().map(|s| s.to_string()).collect(),
            kind: RecipeKind::Food,
        }
    }

    #[tokio::test]
    async fn provider_failure_becomes_a_notice_not_an_error() {
        let svc = service(
            FakeProvider {
                find_items: None,
                ..Default::default()
            },
            FakeGenerative { text: ai_payload() },
        );

        let outcome = svc.search(search_input("s1", &["corn"])).await.unwrap();

        assert_eq!(outcome.bundle.web.len(), 0);
        assert_eq!(outcome.bundle.ai.len(), 1);
        assert_eq!(outcome.notices.len(), 1);
        assert!(outcome.notices[0].contains("unavailable"));
    }

    #[tokio::test]
    async fn confirmation_matching_keeps_recipes_covered_by_the_pantry() {
        let provider = FakeProvider {
            find_items: Some(vec![json!({
                "id": 101,
                "usedIngredients": [{"name": "bell peppers"}],
                "missedIngredients": [{"name": "soy sauce"}],
            })]),
            details: vec![json!({
                "id": 101,
                "title": "Pepper Chicken Stir Fry",
                "extendedIngredients": [
                    {"original": "2 bell peppers, sliced"},
                    {"original": "300 g chicken breast fillet"},
                ],
                "dishTypes": ["main course"],
            })],
            ..Default::default()
        };
        let svc = service(provider, FakeGenerative { text: ai_payload() });

        let outcome = svc
            .search(search_input("s1", &["bell pepper", "chicken breast"]))
            .await
            .unwrap();

        assert_eq!(outcome.bundle.web.len(), 1);
        let record = &outcome.bundle.web[0];
        assert_eq!(record.used_ingredients.len(), 2);
        assert_eq!(record.missed_ingredients, vec!["soy sauce"]);
    }

    #[tokio::test]
    async fn drinks_are_filtered_from_food_searches() {
        let provider = FakeProvider {
            find_items: Some(vec![
                json!({"id": 1, "usedIngredients": [{"name": "banana"}]}),
                json!({"id": 2, "usedIngredients": [{"name": "banana"}]}),
            ]),
            details: vec![
                json!({
                    "id": 1,
                    "title": "Banana Smoothie",
                    "extendedIngredients": [{"original": "1 banana"}],
                    "dishTypes": ["beverage"],
                }),
                json!({
                    "id": 2,
                    "title": "Banana Bread",
                    "extendedIngredients": [{"original": "2 bananas"}],
                    "dishTypes": ["dessert"],
                }),
            ],
            ..Default::default()
        };
        let svc = service(provider, FakeGenerative { text: ai_payload() });

        let outcome = svc.search(search_input("s1", &["banana"])).await.unwrap();

        assert_eq!(outcome.bundle.web.len(), 1);
        assert_eq!(outcome.bundle.web[0].title, "Banana Bread");
    }

    #[tokio::test]
    async fn ai_results_are_capped() {
        let recipes: Vec<Value> = (0..6)
            .map(|i| json!({"title": format!("Recipe {i}"), "ingredients": [], "steps": []}))
            .collect();
        let svc = service(
            FakeProvider {
                find_items: Some(Vec::new()),
                ..Default::default()
            },
            FakeGenerative {
                text: json!({ "recipes": recipes }).to_string(),
            },
        );

        let outcome = svc.search(search_input("s1", &["corn"])).await.unwrap();

        assert_eq!(outcome.bundle.ai.len(), 4);
    }

    #[tokio::test]
    async fn save_favorite_is_idempotent_on_the_dedup_key() {
        let id = identity();
        let svc = service(
            FakeProvider {
                find_items: Some(Vec::new()),
                ..Default::default()
            },
            FakeGenerative { text: ai_payload() },
        );
        svc.search(search_input("s1", &["corn"])).await.unwrap();

        let first = svc
            .save_favorite(&id, "s1", RecipeSource::Ai, "corn-salad")
            .await
            .unwrap();
        let second = svc
            .save_favorite(&id, "s1", RecipeSource::Ai, "corn-salad")
            .await
            .unwrap();

        assert_eq!(first, SaveOutcome::Created);
        assert_eq!(second, SaveOutcome::AlreadyExists);
        assert_eq!(svc.favorites(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn resaving_fills_in_fields_that_were_empty() {
        let id = identity();
        let svc = service(
            FakeProvider {
                find_items: Some(Vec::new()),
                image_url: Some("http://img.example/corn.jpg".into()),
                ..Default::default()
            },
            FakeGenerative {
                text: json!({"recipes": [{"title": "Corn Salad"}]}).to_string(),
            },
        );
        svc.search(search_input("s1", &["corn"])).await.unwrap();

        let first = svc
            .save_favorite(&id, "s1", RecipeSource::Ai, "corn-salad")
            .await
            .unwrap();
        assert_eq!(first, SaveOutcome::Created);

        // The detail view backfills the image into the cached record.
        svc.detail("s1", RecipeSource::Ai, "corn-salad").await.unwrap();
        let second = svc
            .save_favorite(&id, "s1", RecipeSource::Ai, "corn-salad")
            .await
            .unwrap();

        assert_eq!(second, SaveOutcome::Updated);
        let favorites = svc.favorites(&id).await.unwrap();
        assert!(favorites[0].image_url.is_some());
    }

    #[tokio::test]
    async fn hand_entered_favorites_default_to_the_ai_source() {
        let id = identity();
        let svc = service(FakeProvider::default(), FakeGenerative::default());

        let created = svc
            .create_favorite(
                &id,
                CreateFavoriteInput {
                    title: "  Grandma's Stew ".into(),
                    ingredients: vec!["beef".into(), "carrots".into()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(created.source, RecipeSource::Ai);
        assert_eq!(created.title, "Grandma's Stew");
        assert!(!created.external_id.is_empty());
        assert_eq!(svc.favorites(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn hand_entered_favorite_with_a_taken_key_is_a_conflict() {
        let id = identity();
        let svc = service(FakeProvider::default(), FakeGenerative::default());
        let input = || CreateFavoriteInput {
            title: "Pepper Stir Fry".into(),
            source: Some(RecipeSource::Web),
            external_id: Some("101".into()),
            ..Default::default()
        };

        svc.create_favorite(&id, input()).await.unwrap();
        let second = svc.create_favorite(&id, input()).await;

        assert!(matches!(second, Err(CoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn blank_titles_are_rejected_on_manual_create() {
        let id = identity();
        let svc = service(FakeProvider::default(), FakeGenerative::default());
        let result = svc
            .create_favorite(
                &id,
                CreateFavoriteInput {
                    title: "   ".into(),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn delete_favorite_checks_ownership_before_touching_the_row() {
        use crate::domain::recipes::ports::MockSavedRecipeRepository;

        let id = identity();
        let mut repo = MockSavedRecipeRepository::new();
        repo.expect_get_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        repo.expect_delete().times(0);

        let svc = RecipeService::new(
            FakeProvider::default(),
            FakeGenerative::default(),
            FakeCache::default(),
            repo,
            FakeStorage,
            MatchingConfig::default(),
        );

        let result = svc.delete_favorite(&id, Uuid::new_v4()).await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn detail_of_a_stale_result_is_not_found() {
        let svc = service(FakeProvider::default(), FakeGenerative::default());
        let result = svc.detail("s1", RecipeSource::Web, "42").await;
        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn detail_falls_back_to_generic_steps_for_ai_recipes() {
        let svc = service(
            FakeProvider {
                find_items: Some(Vec::new()),
                ..Default::default()
            },
            FakeGenerative {
                text: json!({"recipes": [{"title": "Berry Smoothie"}]}).to_string(),
            },
        );
        svc.search(search_input("s1", &["berries"])).await.unwrap();

        let record = svc
            .detail("s1", RecipeSource::Ai, "berry-smoothie")
            .await
            .unwrap();

        assert!(!record.steps.is_empty());
        assert!(record.steps[0].contains("blender"));
    }
}
