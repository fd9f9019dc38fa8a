// Backend request/response types
//
// Provider-agnostic shapes for a single completion call.

use serde::Serialize;
use thiserror::Error;

use crate::media::NormalizedImage;

/// Failures surfaced by the completion backend boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("not configured")]
    NotConfigured,

    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend returned no completion")]
    EmptyResponse,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// One segment of a multi-part prompt
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    Text(String),
    InlineImage(NormalizedImage),
}

/// A single completion request: prompt parts plus sampling policy
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub parts: Vec<PromptPart>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a text-only request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![PromptPart::Text(prompt.into())],
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    /// Attach an image after the existing parts
    pub fn with_image(mut self, image: NormalizedImage) -> Self {
        self.parts.push(PromptPart::InlineImage(image));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, PromptPart::InlineImage(_)))
            .count()
    }

    /// Concatenated text parts (used for logging sizes, never the content)
    pub fn text_len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => text.len(),
                PromptPart::InlineImage(_) => 0,
            })
            .sum()
    }
}

/// Health-facing summary of the configured backend
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    pub provider: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_defaults() {
        let request = CompletionRequest::text("hello")
            .with_max_tokens(600)
            .with_temperature(0.3);

        assert_eq!(request.parts, vec![PromptPart::Text("hello".to_string())]);
        assert_eq!(request.max_tokens, 600);
        assert_eq!(request.image_count(), 0);
        assert_eq!(request.text_len(), 5);
    }

    #[test]
    fn test_not_configured_message() {
        assert_eq!(BackendError::NotConfigured.to_string(), "not configured");
    }
}
