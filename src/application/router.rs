//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! The user's session slot stays locked for the whole transition, so two messages from the
//! same user are handled strictly one after the other.

use anyhow::Result;
use std::sync::Arc;

use crate::application::feedback::FeedbackRequester;
use crate::application::machine::{Input, SessionState, Transition, transition};
use crate::application::notifier::Notifier;
use crate::application::state::SessionStore;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::traits::ChatProvider;
use crate::interface::commands;

pub struct CommandRouter {
    catalog: Arc<ProjectCatalog>,
    sessions: Arc<SessionStore>,
    feedback: Arc<FeedbackRequester>,
    notifier: Notifier,
    greeting: String,
}

impl CommandRouter {
    pub fn new(
        catalog: Arc<ProjectCatalog>,
        sessions: Arc<SessionStore>,
        feedback: Arc<FeedbackRequester>,
        notifier: Notifier,
        greeting: String,
    ) -> Self {
        Self {
            catalog,
            sessions,
            feedback,
            notifier,
            greeting,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn route<C>(&self, chat: &C, message: &str) -> Result<()>
    where
        C: ChatProvider + ?Sized,
    {
        let mut session = self.sessions.lock(chat.chat_id()).await;

        let state = SessionState::of(session.get());
        let input = Input::classify(message, &self.greeting, &self.catalog);
        let step = transition(state, input);

        tracing::info!(
            "Router dispatching chat={} state={:?} transition={}",
            chat.chat_id(),
            state,
            step.label()
        );

        let result = match step {
            Transition::Welcome => {
                commands::start::handle_start(&self.catalog, &self.notifier, chat).await;
                Ok(())
            }
            Transition::AssignProject(project) => {
                commands::project::handle_project(&mut session, &self.notifier, chat, project)
                    .await;
                Ok(())
            }
            Transition::SubmitAnswer(answer) => {
                commands::answer::handle_answer(
                    &mut session,
                    &self.catalog,
                    &self.feedback,
                    &self.notifier,
                    chat,
                    answer,
                )
                .await
            }
            Transition::Unrecognized => {
                commands::misc::handle_unrecognized(&self.notifier, chat).await;
                Ok(())
            }
        };

        self.sessions.release(session).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{BrokenChat, FakeLlm, RecordingChat, test_router};
    use crate::domain::config::BotConfig;
    use crate::domain::types::ChatId;
    use std::sync::Mutex;
    use std::time::Duration;

    const DESIGN: &str = "طراحی";
    const PROGRAMMING: &str = "برنامه‌نویسی";
    const TRANSLATION: &str = "ترجمه";
    const LOGO_PROJECT: &str = "یک لوگو برای کافی‌شاپی به نام \"صبح\" طراحی کن. رنگ‌های ملایم و قهوه‌ای مد نظر صاحب کاره.";

    fn router(llm: Arc<FakeLlm>) -> CommandRouter {
        test_router(llm)
    }

    #[tokio::test]
    async fn test_full_conversation() {
        let llm = FakeLlm::replying(Ok("نکات مثبت: ...\nامتیاز: ۷۵/۱۰۰"));
        let router = router(llm.clone());
        let chat = RecordingChat::new(42);

        router.route(&chat, "/start").await.unwrap();
        assert_eq!(
            chat.sent()[0],
            format!("به ربات مربی فریلنسری خوش اومدی!\nیکی از مهارت‌ها رو انتخاب کن:\n{DESIGN}\n{PROGRAMMING}\n{TRANSLATION}")
        );

        router.route(&chat, DESIGN).await.unwrap();
        assert_eq!(
            chat.sent()[1],
            format!("پروژه {DESIGN}:\n\n{LOGO_PROJECT}\n\nپاسخت رو ارسال کن.")
        );
        let session = router.sessions().get(42).await.unwrap();
        assert_eq!(session.skill, DESIGN);
        assert_eq!(session.project, LOGO_PROJECT);

        router.route(&chat, "یک طرح ساده").await.unwrap();
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("\"یک طرح ساده\""));
        assert!(requests[0].prompt.contains(LOGO_PROJECT));

        let sent = chat.sent();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[2], "بازخورد منتور:\n\nنکات مثبت: ...\nامتیاز: ۷۵/۱۰۰");
        assert_eq!(
            sent[3],
            format!("می‌تونی پروژه بعدی رو انتخاب کنی:\n{DESIGN}\n{PROGRAMMING}\n{TRANSLATION}")
        );
        assert!(router.sessions().get(42).await.is_none());
        assert_eq!(router.sessions().active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_every_skill_assigns_its_project() {
        let router = router(FakeLlm::replying(Ok("ok")));
        let catalog = ProjectCatalog::new(&BotConfig::default().projects).unwrap();
        for (id, skill) in catalog.skills().enumerate() {
            let chat = RecordingChat::new(id as ChatId);
            router.route(&chat, skill).await.unwrap();
            let session = router.sessions().get(id as ChatId).await.unwrap();
            assert_eq!(session.skill, skill);
            assert_eq!(session.project, catalog.lookup(skill).unwrap().description);
        }
    }

    #[tokio::test]
    async fn test_idle_text_is_unrecognized() {
        let llm = FakeLlm::replying(Ok("ok"));
        let router = router(llm.clone());
        let chat = RecordingChat::new(1);

        router.route(&chat, "hello").await.unwrap();
        assert_eq!(
            chat.sent(),
            vec!["دستور نامفهوم. لطفاً یکی از گزینه‌ها رو انتخاب کن یا /start بزن.".to_string()]
        );
        assert!(llm.requests().is_empty());
        assert!(router.sessions().get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_greeting_keeps_pending_session() {
        let llm = FakeLlm::replying(Ok("ok"));
        let router = router(llm.clone());
        let chat = RecordingChat::new(1);

        router.route(&chat, TRANSLATION).await.unwrap();
        router.route(&chat, "/start").await.unwrap();

        let session = router.sessions().get(1).await.unwrap();
        assert_eq!(session.skill, TRANSLATION);
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_skill_while_pending_restarts() {
        let llm = FakeLlm::replying(Ok("ok"));
        let router = router(llm.clone());
        let chat = RecordingChat::new(1);

        router.route(&chat, DESIGN).await.unwrap();
        router.route(&chat, PROGRAMMING).await.unwrap();

        assert!(llm.requests().is_empty());
        assert_eq!(router.sessions().get(1).await.unwrap().skill, PROGRAMMING);
        assert_eq!(router.sessions().active_sessions(), 1);
    }

    #[tokio::test]
    async fn test_feedback_failure_still_clears_session() {
        let llm = FakeLlm::replying(Err("HTTP request failed: connection refused"));
        let router = router(llm.clone());
        let chat = RecordingChat::new(7);

        router.route(&chat, DESIGN).await.unwrap();
        router.route(&chat, "answer").await.unwrap();

        let sent = chat.sent();
        let feedback: Vec<_> = sent
            .iter()
            .filter(|m| m.starts_with("بازخورد منتور:"))
            .collect();
        assert_eq!(feedback.len(), 1);
        assert!(feedback[0].contains("متأسفانه خطایی رخ داد: HTTP request failed: connection refused"));
        assert!(sent.last().unwrap().starts_with("می‌تونی پروژه بعدی رو انتخاب کنی:"));
        assert!(router.sessions().get(7).await.is_none());

        // Idle again: the same text is no longer an answer.
        router.route(&chat, "answer").await.unwrap();
        assert_eq!(llm.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_reselecting_after_feedback_recreates_session() {
        let router = router(FakeLlm::replying(Ok("ok")));
        let chat = RecordingChat::new(3);

        router.route(&chat, DESIGN).await.unwrap();
        let first = router.sessions().get(3).await.unwrap();
        router.route(&chat, "done").await.unwrap();
        router.route(&chat, DESIGN).await.unwrap();
        let second = router.sessions().get(3).await.unwrap();

        assert_eq!(first.skill, second.skill);
        assert_eq!(first.project, second.project);
    }

    #[tokio::test]
    async fn test_double_submission_requests_feedback_once() {
        let llm = Arc::new(FakeLlm {
            reply: Ok("ok".to_string()),
            delay: Duration::from_millis(100),
            requests: Mutex::new(Vec::new()),
        });
        let router = Arc::new(router(llm.clone()));
        let chat = Arc::new(RecordingChat::new(5));
        router.route(chat.as_ref(), DESIGN).await.unwrap();

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let router = router.clone();
                let chat = chat.clone();
                tokio::spawn(async move { router.route(chat.as_ref(), "my answer").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(llm.requests().len(), 1);
        let unrecognized = chat
            .sent()
            .iter()
            .filter(|m| m.starts_with("دستور نامفهوم"))
            .count();
        assert_eq!(unrecognized, 1);
    }

    #[tokio::test]
    async fn test_dropped_submission_still_clears_session() {
        let llm = Arc::new(FakeLlm {
            reply: Ok("ok".to_string()),
            delay: Duration::from_millis(500),
            requests: Mutex::new(Vec::new()),
        });
        let router = router(llm.clone());
        let chat = RecordingChat::new(6);
        router.route(&chat, DESIGN).await.unwrap();

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), router.route(&chat, "answer")).await;
        assert!(cancelled.is_err());
        assert_eq!(llm.requests().len(), 1);
        assert!(router.sessions().get(6).await.is_none());
        assert_eq!(router.sessions().active_sessions(), 0);

        // A redelivered update finds the user idle.
        router.route(&chat, "answer").await.unwrap();
        assert_eq!(llm.requests().len(), 1);
        assert!(chat.sent().last().unwrap().starts_with("دستور نامفهوم"));
    }

    #[tokio::test]
    async fn test_send_failures_do_not_break_transitions() {
        let router = router(FakeLlm::replying(Ok("ok")));
        let chat = BrokenChat;

        router.route(&chat, DESIGN).await.unwrap();
        assert!(router.sessions().get(99).await.is_some());
        router.route(&chat, "answer").await.unwrap();
        assert!(router.sessions().get(99).await.is_none());
    }
}
