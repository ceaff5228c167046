//! # LLM Client
//!
//! Provides the `Client` struct, the entry point for completion requests.
//! It resolves the configured provider once and reuses a single HTTP client.

use crate::domain::config::LlmConfig;
use crate::domain::traits::LlmProvider;
use crate::domain::types::CompletionRequest;
use crate::infrastructure::llm::providers::{self, ProviderConfig};
use crate::infrastructure::llm::{Context, Error, Response};
use async_trait::async_trait;
use std::time::Duration;

/// Simple LLM client
pub struct Client {
    http: reqwest::Client,
    provider_config: ProviderConfig,
}

impl Client {
    /// Create a new client from the completion service configuration
    pub fn new(config: &LlmConfig) -> Result<Self, Error> {
        let provider_config = ProviderConfig::from_llm_config(config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                Error::new(
                    provider_config.provider.as_str(),
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;
        Ok(Self {
            http,
            provider_config,
        })
    }

    /// Send a prompt with explicit sampling settings
    ///
    /// # Example
    /// ```rust,ignore
    /// let response = client.prompt("Hello", "gpt-3.5-turbo", 0.7, 500).await?;
    /// println!("Response: {}", response.content);
    /// ```
    pub async fn prompt(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Response, Error> {
        let context = Context::prompt(prompt)
            .with_model(model)
            .with_temperature(temperature)
            .with_max_tokens(max_tokens);
        providers::chat(&self.http, self.provider_config.clone(), context).await
    }
}

#[async_trait]
impl LlmProvider for Client {
    async fn completion(&self, request: CompletionRequest) -> Result<String, String> {
        let response = self
            .prompt(
                &request.prompt,
                &request.model,
                request.temperature,
                request.max_tokens,
            )
            .await
            .map_err(|e| e.message)?;
        tracing::debug!(
            "Completion from {} used {} tokens ({} prompt, {} completion)",
            response.model,
            response.usage.total_tokens,
            response.usage.prompt_tokens,
            response.usage.completion_tokens
        );
        Ok(response.content)
    }
}
