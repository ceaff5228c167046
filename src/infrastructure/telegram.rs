//! # Telegram Service Adapter
//!
//! Implements the `ChatProvider` trait for the Telegram Bot API.
//! `TelegramBot` owns the HTTP client and credentials; `TelegramService` binds it to one chat
//! so the dispatcher can talk to "this conversation" without knowing about Telegram.

use crate::domain::config::TelegramConfig;
use crate::domain::traits::{ChatConnector, ChatProvider};
use crate::domain::types::ChatId;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: ChatId,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

pub struct TelegramBot {
    http: reqwest::Client,
    api_url: String,
    token: String,
    parse_mode: String,
}

impl TelegramBot {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create Telegram HTTP client")?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            parse_mode: config.parse_mode.clone(),
        })
    }

    /// Binds the bot to a single chat.
    pub fn chat(self: &Arc<Self>, chat_id: ChatId) -> TelegramService {
        TelegramService {
            bot: self.clone(),
            chat_id,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<String, String> {
        let payload = SendMessageRequest {
            chat_id,
            text,
            parse_mode: &self.parse_mode,
        };

        // Errors carry the request URL, which embeds the token.
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| e.without_url().to_string())?;
        parse_send_response(status, &body)
    }
}

fn parse_send_response(status: reqwest::StatusCode, body: &str) -> Result<String, String> {
    match serde_json::from_str::<ApiResponse>(body) {
        Ok(ApiResponse {
            ok: true,
            result: Some(sent),
            ..
        }) => Ok(sent.message_id.to_string()),
        Ok(ApiResponse { ok: true, .. }) => Ok(String::new()),
        Ok(ApiResponse { description, .. }) => Err(description
            .unwrap_or_else(|| format!("Telegram rejected the message (HTTP {})", status))),
        Err(_) => Err(format!("HTTP {}: {}", status, body)),
    }
}

#[derive(Clone)]
pub struct TelegramService {
    bot: Arc<TelegramBot>,
    chat_id: ChatId,
}

#[async_trait]
impl ChatProvider for TelegramService {
    fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.chat_id, content);
        self.bot.send_message(self.chat_id, content).await
    }
}

impl ChatConnector for Arc<TelegramBot> {
    fn open(&self, chat_id: ChatId) -> Box<dyn ChatProvider> {
        Box::new(self.chat(chat_id))
    }
}
