//! # Notifier
//!
//! Delivers a message through a `ChatProvider` with a bounded timeout and a single retry.
//! Failures are logged and returned; callers in the dispatch path only log them.

use crate::domain::traits::ChatProvider;
use crate::strings::logs;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Notifier {
    timeout: Duration,
    retry_backoff: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration, retry_backoff: Duration) -> Self {
        Self {
            timeout,
            retry_backoff,
        }
    }

    async fn attempt<C>(&self, chat: &C, text: &str) -> Result<String, String>
    where
        C: ChatProvider + ?Sized,
    {
        match tokio::time::timeout(self.timeout, chat.send_message(text)).await {
            Ok(result) => result,
            Err(_) => Err(format!("send timed out after {:?}", self.timeout)),
        }
    }

    /// Sends `text`, retrying once after the backoff. Returns the platform message id.
    pub async fn send<C>(&self, chat: &C, text: &str) -> Result<String, String>
    where
        C: ChatProvider + ?Sized,
    {
        let first = match self.attempt(chat, text).await {
            Ok(id) => return Ok(id),
            Err(e) => e,
        };
        tracing::warn!("{}", logs::send_retry(chat.chat_id(), &first));
        tokio::time::sleep(self.retry_backoff).await;

        self.attempt(chat, text).await.inspect_err(|e| {
            tracing::error!("{}", logs::send_dropped(chat.chat_id(), e));
        })
    }
}
