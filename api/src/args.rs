use clap::Parser;
use smartpantry_core::domain::common::{
    DatabaseConfig, LlmConfig, MatchingConfig, ObjectStorageConfig, OcrConfig, RecipeApiConfig,
    SessionConfig, SmartPantryConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "smartpantry-api", about = "Smart Pantry HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,
    #[command(flatten)]
    pub db: DatabaseArgs,
    #[command(flatten)]
    pub recipe_api: RecipeApiArgs,
    #[command(flatten)]
    pub llm: LlmArgs,
    #[command(flatten)]
    pub ocr: OcrArgs,
    #[command(flatten)]
    pub storage: StorageArgs,
    #[command(flatten)]
    pub matching: MatchingArgs,
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct ServerArgs {
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,
    /// Prefix prepended to every route, e.g. "/api".
    #[arg(long, env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
    #[arg(
        long,
        env = "SERVER_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
    #[arg(long, env = "LOG_FILTER", default_value = "info")]
    pub log_filter: String,
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct DatabaseArgs {
    #[arg(long, env = "DATABASE_HOST", default_value = "localhost")]
    pub database_host: String,
    #[arg(long, env = "DATABASE_PORT", default_value_t = 5432)]
    pub database_port: u16,
    #[arg(long, env = "DATABASE_USER", default_value = "smartpantry")]
    pub database_user: String,
    #[arg(long, env = "DATABASE_PASSWORD", default_value = "smartpantry")]
    pub database_password: String,
    #[arg(long, env = "DATABASE_NAME", default_value = "smartpantry")]
    pub database_name: String,
}

#[derive(Debug, Clone, Parser)]
pub struct RecipeApiArgs {
    /// Empty key disables web recipe search gracefully.
    #[arg(long, env = "RECIPE_API_KEY", default_value = "")]
    pub recipe_api_key: String,
    #[arg(
        long,
        env = "RECIPE_API_BASE_URL",
        default_value = "https://api.spoonacular.com"
    )]
    pub recipe_api_base_url: String,
}

#[derive(Debug, Clone, Parser)]
pub struct LlmArgs {
    #[arg(long, env = "LLM_API_KEY", default_value = "")]
    pub llm_api_key: String,
    #[arg(long, env = "LLM_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub llm_base_url: String,
    #[arg(long, env = "LLM_TEXT_MODEL", default_value = "gpt-4o-mini")]
    pub llm_text_model: String,
    #[arg(long, env = "LLM_VISION_MODEL", default_value = "gpt-4o-mini")]
    pub llm_vision_model: String,
    #[arg(long, env = "LLM_IMAGE_MODEL", default_value = "dall-e-3")]
    pub llm_image_model: String,
    #[arg(long, env = "LLM_ENABLE_IMAGE_GENERATION", default_value_t = false)]
    pub llm_enable_image_generation: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct OcrArgs {
    #[arg(long, env = "OCR_TESSERACT_CMD", default_value = "tesseract")]
    pub tesseract_cmd: String,
}

#[derive(Debug, Clone, Parser)]
pub struct StorageArgs {
    #[arg(long, env = "STORAGE_ENDPOINT", default_value = "http://localhost:9000")]
    pub storage_endpoint: String,
    #[arg(long, env = "STORAGE_REGION", default_value = "us-east-1")]
    pub storage_region: String,
    #[arg(long, env = "STORAGE_ACCESS_KEY", default_value = "minioadmin")]
    pub storage_access_key: String,
    #[arg(long, env = "STORAGE_SECRET_KEY", default_value = "minioadmin")]
    pub storage_secret_key: String,
    #[arg(long, env = "STORAGE_BUCKET", default_value = "smartpantry")]
    pub storage_bucket: String,
    #[arg(
        long,
        env = "STORAGE_PUBLIC_BASE_URL",
        default_value = "http://localhost:9000"
    )]
    pub storage_public_base_url: String,
}

#[derive(Debug, Clone, Parser)]
pub struct MatchingArgs {
    #[arg(long, env = "MATCHING_MIN_MATCHED_API", default_value_t = 1)]
    pub min_matched_api: usize,
    #[arg(long, env = "MATCHING_MIN_CONFIRMED", default_value_t = 1)]
    pub min_confirmed: usize,
}

#[derive(Debug, Clone, Parser)]
pub struct SessionArgs {
    #[arg(long, env = "SESSION_RESULT_TTL_SECS", default_value_t = 1800)]
    pub result_ttl_secs: u64,
}

impl From<Args> for SmartPantryConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.database_host,
                port: args.db.database_port,
                username: args.db.database_user,
                password: args.db.database_password,
                name: args.db.database_name,
            },
            recipe_api: RecipeApiConfig {
                api_key: args.recipe_api.recipe_api_key,
                base_url: args.recipe_api.recipe_api_base_url,
            },
            llm: LlmConfig {
                api_key: args.llm.llm_api_key,
                base_url: args.llm.llm_base_url,
                text_model: args.llm.llm_text_model,
                vision_model: args.llm.llm_vision_model,
                image_model: args.llm.llm_image_model,
                enable_image_generation: args.llm.llm_enable_image_generation,
            },
            ocr: OcrConfig {
                tesseract_cmd: args.ocr.tesseract_cmd,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.storage.storage_endpoint,
                region: args.storage.storage_region,
                access_key: args.storage.storage_access_key,
                secret_key: args.storage.storage_secret_key,
                bucket: args.storage.storage_bucket,
                public_base_url: args.storage.storage_public_base_url,
            },
            matching: MatchingConfig {
                min_matched_api: args.matching.min_matched_api,
                min_confirmed: args.matching.min_confirmed,
            },
            session: SessionConfig {
                result_ttl_secs: args.session.result_ttl_secs,
            },
        }
    }
}
