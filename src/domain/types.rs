//! # Domain Types
//!
//! Common data structures used across the application logic: inbound chat updates,
//! per-user sessions and completion requests.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Telegram chat identifier. Private chats use the user's id.
pub type ChatId = i64;

/// Inbound webhook update. Only the fields the dispatcher consumes are modelled;
/// everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

impl Update {
    /// Returns `(chat_id, text)` when the update carries a text message.
    pub fn text_message(&self) -> Option<(ChatId, &str)> {
        let message = self.message.as_ref()?;
        let chat = message.chat.as_ref()?;
        let text = message.text.as_deref()?;
        Some((chat.id, text))
    }
}

/// Active practice assignment for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub chat_id: ChatId,
    pub skill: String,
    pub project: String,
    pub assigned_at: DateTime<Utc>,
}

impl Session {
    pub fn new(chat_id: ChatId, skill: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            chat_id,
            skill: skill.into(),
            project: project.into(),
            assigned_at: Utc::now(),
        }
    }

    /// Seconds since the project was handed out.
    pub fn age_secs(&self) -> i64 {
        (Utc::now() - self.assigned_at).num_seconds()
    }
}

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}
