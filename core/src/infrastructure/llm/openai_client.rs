use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{entities::app_errors::CoreError, LlmConfig},
    recipes::ports::GenerativeClient,
};

const TEXT_TIMEOUT: Duration = Duration::from_secs(45);
/// Vision and image generation take longer than plain chat.
const VISION_TIMEOUT: Duration = Duration::from_secs(60);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI-compatible chat-completions client covering recipe-text
/// generation, pantry-photo vision and optional image generation.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: LlmConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u8,
    size: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn check_key(&self) -> Result<(), CoreError> {
        if self.config.api_key.trim().is_empty() {
            return Err(CoreError::ExternalServiceError(
                "LLM API key is not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn call_chat_api(
        &self,
        request: ChatRequest,
        timeout: Duration,
    ) -> Result<String, CoreError> {
        self.check_key()?;
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("LLM API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("LLM API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {status} - {error_text}"
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
            CoreError::ExternalServiceError(format!("failed to parse LLM response: {e}"))
        })?;

        chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| CoreError::ExternalServiceError("no response from LLM".to_string()))
    }

    fn json_chat_request(&self, model: &str, messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            temperature: 0.2,
            response_format: Some(ResponseFormat {
                kind: "json_object".to_string(),
            }),
            messages,
        }
    }

    async fn vision_call(
        &self,
        system_prompt: String,
        user_prompt: String,
        image_url: String,
    ) -> Result<String, CoreError> {
        let request = self.json_chat_request(
            &self.config.vision_model,
            vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(system_prompt),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: user_prompt },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: image_url },
                        },
                    ]),
                },
            ],
        );
        self.call_chat_api(request, VISION_TIMEOUT).await
    }
}

impl GenerativeClient for OpenAiClient {
    async fn generate_text(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<String, CoreError> {
        let request = self.json_chat_request(
            &self.config.text_model,
            vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(system_prompt),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Text(user_prompt),
                },
            ],
        );
        self.call_chat_api(request, TEXT_TIMEOUT).await
    }

    async fn generate_with_image_bytes(
        &self,
        system_prompt: String,
        user_prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
    ) -> Result<String, CoreError> {
        let data_url = format!(
            "data:{};base64,{}",
            mime_type,
            general_purpose::STANDARD.encode(&image_data)
        );
        self.vision_call(system_prompt, user_prompt, data_url).await
    }

    async fn generate_with_image_url(
        &self,
        system_prompt: String,
        user_prompt: String,
        image_url: String,
    ) -> Result<String, CoreError> {
        self.vision_call(system_prompt, user_prompt, image_url).await
    }

    async fn generate_image(&self, prompt: String) -> Result<Option<String>, CoreError> {
        if !self.config.enable_image_generation {
            return Ok(None);
        }
        self.check_key()?;

        let url = format!(
            "{}/images/generations",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ImageRequest {
            model: self.config.image_model.clone(),
            prompt,
            n: 1,
            size: "1024x1024".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("image generation request failed: {}", e);
                CoreError::ExternalServiceError(format!("image API error: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("image generation returned {}", status);
            return Ok(None);
        }

        let image_response: ImageResponse = response.json().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("failed to parse image response: {e}"))
        })?;
        Ok(image_response.data.into_iter().find_map(|d| d.url))
    }
}
