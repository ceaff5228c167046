//! # Answer Submission
//!
//! Handles the message a user sends while a project is pending: asks the mentor for
//! feedback, delivers it, closes the session and offers the next project.

use crate::application::feedback::FeedbackRequester;
use crate::application::notifier::Notifier;
use crate::application::state::SessionGuard;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use anyhow::{Result, bail};

pub async fn handle_answer<C>(
    session: &mut SessionGuard,
    catalog: &ProjectCatalog,
    feedback: &FeedbackRequester,
    notifier: &Notifier,
    chat: &C,
    answer: &str,
) -> Result<()>
where
    C: ChatProvider + ?Sized,
{
    // Cleared before any await: a dropped request must not leave the project pending.
    let Some(pending) = session.take() else {
        bail!("No pending project for chat {}", session.chat_id());
    };
    tracing::info!(
        "Chat {} submitted an answer for '{}' after {}s",
        pending.chat_id,
        pending.skill,
        pending.age_secs()
    );

    // The fallback text on failure is still delivered, so the user is never left waiting.
    let text = feedback.request(&pending.project, answer).await;
    let _ = notifier.send(chat, &messages::mentor_feedback(&text)).await;

    let _ = notifier
        .send(chat, &messages::next_project(catalog.skills()))
        .await;
    Ok(())
}
