//! # Feedback Requester
//!
//! Turns a project description and a user's answer into mentor feedback via the completion
//! service. Never fails: any error, including a timeout, becomes a user-visible fallback text.

use crate::domain::config::LlmConfig;
use crate::domain::traits::LlmProvider;
use crate::domain::types::CompletionRequest;
use crate::strings::{logs, messages, prompts};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FeedbackSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&LlmConfig> for FeedbackSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

pub struct FeedbackRequester {
    llm: Arc<dyn LlmProvider>,
    settings: FeedbackSettings,
}

impl FeedbackRequester {
    pub fn new(llm: Arc<dyn LlmProvider>, settings: FeedbackSettings) -> Self {
        Self { llm, settings }
    }

    pub async fn request(&self, project: &str, answer: &str) -> String {
        let request = CompletionRequest {
            prompt: prompts::feedback_prompt(project, answer),
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let completion = self.llm.completion(request);
        let result = match tokio::time::timeout(self.settings.timeout, completion).await {
            Ok(result) => result,
            Err(_) => Err(format!(
                "completion timed out after {:?}",
                self.settings.timeout
            )),
        };

        match result {
            Ok(feedback) => feedback,
            Err(e) => {
                tracing::warn!("{}", logs::feedback_failed(&e));
                messages::feedback_error(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeLlm {
        reply: Result<String, String>,
        delay: Duration,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeLlm {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn completion(&self, request: CompletionRequest) -> Result<String, String> {
            self.seen.lock().unwrap().push(request);
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }
    }

    fn settings() -> FeedbackSettings {
        FeedbackSettings::from(&LlmConfig::default())
    }

    #[tokio::test]
    async fn test_success_returns_completion() {
        let llm = Arc::new(FakeLlm::new(Ok("امتیاز: ۸۰ از ۱۰۰")));
        let requester = FeedbackRequester::new(llm.clone(), settings());

        let feedback = requester.request("لوگو", "یک طرح ساده").await;
        assert_eq!(feedback, "امتیاز: ۸۰ از ۱۰۰");

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-3.5-turbo");
        assert_eq!(seen[0].max_tokens, 500);
        assert!((seen[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(seen[0].prompt.contains("\"لوگو\""));
        assert!(seen[0].prompt.contains("\"یک طرح ساده\""));
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback_text() {
        let llm = Arc::new(FakeLlm::new(Err("HTTP request failed: connection refused")));
        let requester = FeedbackRequester::new(llm, settings());
        let feedback = requester.request("p", "a").await;
        assert_eq!(
            feedback,
            "متأسفانه خطایی رخ داد: HTTP request failed: connection refused"
        );
    }

    #[tokio::test]
    async fn test_timeout_becomes_fallback_text() {
        let mut llm = FakeLlm::new(Ok("too late"));
        llm.delay = Duration::from_secs(10);
        let mut settings = settings();
        settings.timeout = Duration::from_millis(50);
        let requester = FeedbackRequester::new(Arc::new(llm), settings);

        let feedback = requester.request("p", "a").await;
        assert!(feedback.starts_with("متأسفانه خطایی رخ داد: "));
        assert!(feedback.contains("timed out after 50ms"));
    }
}
