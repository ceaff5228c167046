//! # LLM Providers
//!
//! Contains the provider implementations. Every supported provider is reached through the
//! OpenAI-compatible chat completions API; they differ only in their default endpoint.

mod openai;

use crate::domain::config::LlmConfig;
use crate::infrastructure::llm::{Context, Error, Provider, Response};

/// Configuration for a provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    /// API key
    pub api_key: String,
    /// Base URL, already resolved against the provider default
    pub base_url: String,
    /// Default model
    pub default_model: String,
}

impl ProviderConfig {
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, Error> {
        let provider = Provider::from_str(&config.provider)
            .ok_or_else(|| Error::new(&config.provider, "Unknown provider"))?;

        if config.api_key.is_empty() {
            return Err(Error::new(
                provider.as_str(),
                format!("No API key provided - set {}", config.api_key_env),
            ));
        }

        Ok(Self {
            provider,
            api_key: config.api_key.clone(),
            base_url: config
                .endpoint
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            default_model: config.model.clone(),
        })
    }
}

/// Execute a chat request with the configured provider
pub async fn chat(
    http: &reqwest::Client,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    match config.provider {
        Provider::OpenAI | Provider::Groq | Provider::XAI => {
            openai::chat(http, config, context).await
        }
    }
}
