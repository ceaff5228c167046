//! # Project Command
//!
//! Handles a skill selection: hands out the skill's practice project and records the
//! session so the next message is taken as the answer.

use crate::application::notifier::Notifier;
use crate::application::state::SessionGuard;
use crate::domain::catalog::Project;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Session;
use crate::strings::{logs, messages};

pub async fn handle_project<C>(
    session: &mut SessionGuard,
    notifier: &Notifier,
    chat: &C,
    project: &Project,
) where
    C: ChatProvider + ?Sized,
{
    let chat_id = session.chat_id();
    let replaced = session.put(Session::new(
        chat_id,
        project.skill.as_str(),
        project.description.as_str(),
    ));
    if let Some(old) = replaced {
        tracing::info!(
            "{}",
            logs::session_replaced(chat_id, &old.skill, &project.skill)
        );
    }

    let _ = notifier
        .send(
            chat,
            &messages::project_assigned(&project.skill, &project.description),
        )
        .await;
}
