// OpenAI API provider implementation
//
// Chat completions endpoint; works for any OpenAI-compatible base URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{BackendError, CompletionRequest, PromptPart};
use super::LlmProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI chat completions provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAIProvider {
    /// Create a provider with custom settings
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        })
    }

    /// Convert a CompletionRequest to the chat completions wire format
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let has_image = request.image_count() > 0;

        let content = if has_image {
            let parts = request
                .parts
                .iter()
                .map(|part| match part {
                    PromptPart::Text(text) => OpenAIContentPart::Text { text: text.clone() },
                    PromptPart::InlineImage(image) => OpenAIContentPart::ImageUrl {
                        image_url: OpenAIImageUrl {
                            url: image.to_data_url(),
                        },
                    },
                })
                .collect();
            OpenAIContent::Parts(parts)
        } else {
            let text = request
                .parts
                .iter()
                .filter_map(|part| match part {
                    PromptPart::Text(text) => Some(text.as_str()),
                    PromptPart::InlineImage(_) => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            OpenAIContent::Text(text)
        };

        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let openai_request = self.to_openai_request(request);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            images = request.image_count(),
            "Sending request to OpenAI API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "OpenAI API request failed");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let text = openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyResponse)?;

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIMessage {
    role: String,
    content: OpenAIContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum OpenAIContent {
    Text(String),
    Parts(Vec<OpenAIContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAIContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenAIImageUrl },
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIImageUrl {
    url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}
