//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, LLM).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::types::{ChatId, CompletionRequest};
use async_trait::async_trait;

/// Abstract interface for a Chat Provider bound to a single conversation (e.g., a Telegram chat)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the chat, returning the platform's message id
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Get the chat this provider delivers to
    fn chat_id(&self) -> ChatId;
}

/// Opens a `ChatProvider` for a conversation the bot was contacted from
pub trait ChatConnector: Send + Sync {
    fn open(&self, chat_id: ChatId) -> Box<dyn ChatProvider>;
}

/// Abstract interface for an LLM Provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion
    async fn completion(&self, request: CompletionRequest) -> Result<String, String>;
}
