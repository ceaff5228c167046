//! Test doubles for the chat and completion seams.

use crate::application::feedback::{FeedbackRequester, FeedbackSettings};
use crate::application::notifier::Notifier;
use crate::application::router::CommandRouter;
use crate::application::state::SessionStore;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::config::{BotConfig, LlmConfig};
use crate::domain::traits::{ChatProvider, LlmProvider};
use crate::domain::types::{ChatId, CompletionRequest};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct RecordingChat {
    pub id: ChatId,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingChat {
    pub fn new(id: ChatId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(content.to_string());
        Ok(sent.len().to_string())
    }

    fn chat_id(&self) -> ChatId {
        self.id
    }
}

pub struct BrokenChat;

#[async_trait]
impl ChatProvider for BrokenChat {
    async fn send_message(&self, _content: &str) -> Result<String, String> {
        Err("Forbidden: bot was blocked by the user".to_string())
    }

    fn chat_id(&self) -> ChatId {
        99
    }
}

pub struct FakeLlm {
    pub reply: Result<String, String>,
    pub delay: Duration,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn replying(reply: Result<&str, &str>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(str::to_string).map_err(str::to_string),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn completion(&self, request: CompletionRequest) -> Result<String, String> {
        self.requests.lock().unwrap().push(request);
        tokio::time::sleep(self.delay).await;
        self.reply.clone()
    }
}

/// Router over the default catalog with an instant, no-backoff notifier.
pub fn test_router(llm: Arc<FakeLlm>) -> CommandRouter {
    let bot = BotConfig::default();
    CommandRouter::new(
        Arc::new(ProjectCatalog::new(&bot.projects).unwrap()),
        Arc::new(SessionStore::new()),
        Arc::new(FeedbackRequester::new(
            llm,
            FeedbackSettings::from(&LlmConfig::default()),
        )),
        Notifier::new(Duration::from_secs(1), Duration::ZERO),
        bot.greeting,
    )
}
