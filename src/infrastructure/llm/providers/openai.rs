//! OpenAI-compatible API provider
//!
//! Supports OpenAI, Groq, XAI and other OpenAI-compatible APIs

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ProviderConfig;
use crate::infrastructure::llm::{Context, Error, Response, TokenUsage};

/// OpenAI API request format
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn build_request(config: &ProviderConfig, context: Context) -> OpenAIRequest {
    let model = context.model.unwrap_or_else(|| config.default_model.clone());
    OpenAIRequest {
        model,
        messages: context
            .messages
            .into_iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content,
            })
            .collect(),
        temperature: context.temperature,
        max_tokens: context.max_tokens,
    }
}

/// Longest error detail kept from a response body, in characters.
const MAX_ERROR_DETAIL: usize = 300;

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Turns a non-success body into an error, preferring the API's own message.
/// The detail ends up in a chat message, so it is capped.
fn error_from_body(provider: &str, status: reqwest::StatusCode, body: &str) -> Error {
    if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(error_msg) = error_json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
    {
        return Error::new(provider, truncate_chars(error_msg, MAX_ERROR_DETAIL));
    }
    Error::new(
        provider,
        format!("HTTP {}: {}", status, truncate_chars(body.trim(), MAX_ERROR_DETAIL)),
    )
}

fn parse_response(provider: &str, body: &str) -> Result<Response, Error> {
    let openai_response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| Error::new(provider, format!("Failed to parse response: {}", e)))?;

    let choice = openai_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::new(provider, "No choices in response"))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| Error::new(provider, "Empty completion content"))?;

    let usage = openai_response
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(Response {
        content,
        model: openai_response.model,
        usage,
    })
}

/// Execute a chat request using OpenAI-compatible API
pub async fn chat(
    http: &Client,
    config: ProviderConfig,
    context: Context,
) -> Result<Response, Error> {
    let provider = config.provider.as_str().to_string();
    let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
    let request = build_request(&config, context);

    let response = http
        .post(&url)
        .header("Authorization", format!("Bearer {}", config.api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| Error::new(&provider, format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::new(&provider, format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        return Err(error_from_body(&provider, status, &body));
    }

    parse_response(&provider, &body)
}
