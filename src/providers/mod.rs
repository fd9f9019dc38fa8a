// Completion backend support
//
// `LlmProvider` is the seam to the external chat/vision completion service.
// `BackendClient` owns the configured provider (if any) and enforces the
// application-level contract: typed failures, one image at most, timeout.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub mod openai;
pub mod types;

pub use openai::OpenAIProvider;
pub use types::{BackendError, BackendInfo, CompletionRequest, PromptPart};

use crate::config::BackendConfig;

/// Trait for completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Submit one request and return the first completion's text verbatim
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;

    /// Provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Model identifier sent with every request
    fn model(&self) -> &str;
}

/// Fallible wrapper around the configured provider
#[derive(Clone)]
pub struct BackendClient {
    provider: Option<Arc<dyn LlmProvider>>,
    timeout: Duration,
}

impl BackendClient {
    /// Build from configuration. A missing API key yields an unconfigured
    /// client rather than an error.
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let Some(api_key) = config.api_key.as_deref() else {
            tracing::warn!("No backend API key configured; backend tools will fail until OPENAI_API_KEY is set");
            return Ok(Self::unconfigured(timeout));
        };

        let provider = OpenAIProvider::new(api_key, &config.base_url, &config.model, timeout)?;
        Ok(Self::with_provider(Arc::new(provider), timeout))
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    pub fn unconfigured(timeout: Duration) -> Self {
        Self {
            provider: None,
            timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn info(&self) -> Option<BackendInfo> {
        self.provider.as_ref().map(|p| BackendInfo {
            provider: p.name().to_string(),
            model: p.model().to_string(),
        })
    }

    /// Run one completion; every fault comes back as a `BackendError`
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let provider = self.provider.as_ref().ok_or(BackendError::NotConfigured)?;

        if request.image_count() > 1 {
            return Err(BackendError::InvalidRequest(
                "at most one image attachment per request".to_string(),
            ));
        }

        let start = std::time::Instant::now();
        let result = tokio::time::timeout(self.timeout, provider.complete(request))
            .await
            .unwrap_or(Err(BackendError::Timeout {
                secs: self.timeout.as_secs(),
            }));

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(text) => tracing::info!(
                provider = provider.name(),
                elapsed_ms,
                prompt_chars = request.text_len(),
                completion_chars = text.len(),
                "Backend completion succeeded"
            ),
            Err(e) => tracing::warn!(
                provider = provider.name(),
                elapsed_ms,
                error = %e,
                "Backend completion failed"
            ),
        }

        result
    }
}
