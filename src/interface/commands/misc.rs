//! # Unrecognized Input
//!
//! Anything that is not the greeting, a skill name, or an answer to a pending project.

use crate::application::notifier::Notifier;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub async fn handle_unrecognized<C>(notifier: &Notifier, chat: &C)
where
    C: ChatProvider + ?Sized,
{
    let _ = notifier.send(chat, messages::UNRECOGNIZED).await;
}
