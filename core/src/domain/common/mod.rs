use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;

/// Top-level typed configuration assembled by the API layer from CLI/env
/// arguments and handed to the core wiring.
#[derive(Clone, Debug)]
pub struct SmartPantryConfig {
    pub database: DatabaseConfig,
    pub recipe_api: RecipeApiConfig,
    pub llm: LlmConfig,
    pub ocr: OcrConfig,
    pub object_storage: ObjectStorageConfig,
    pub matching: MatchingConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

/// Recipe-search provider credentials. An empty key is legal: every
/// dependent feature degrades to empty results instead of failing.
#[derive(Clone, Debug)]
pub struct RecipeApiConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub image_model: String,
    pub enable_image_generation: bool,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    /// Path to the tesseract binary. A missing binary means OCR quietly
    /// yields no text and the pipeline moves to the next stage.
    pub tesseract_cmd: String,
}

#[derive(Clone, Debug)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub public_base_url: String,
}

/// Confirmation-matching thresholds for web search results. The original
/// deployment ran with both at 1; kept configurable rather than guessing
/// stricter values.
#[derive(Clone, Debug)]
pub struct MatchingConfig {
    pub min_matched_api: usize,
    pub min_confirmed: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_matched_api: 1,
            min_confirmed: 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub result_ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            result_ttl_secs: 30 * 60,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}
