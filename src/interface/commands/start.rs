//! # Start Command
//!
//! Handles the greeting command (`/start` by default).
//! Lists the available skills; never touches the user's session.

use crate::application::notifier::Notifier;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub async fn handle_start<C>(catalog: &ProjectCatalog, notifier: &Notifier, chat: &C)
where
    C: ChatProvider + ?Sized,
{
    let _ = notifier.send(chat, &messages::welcome(catalog.skills())).await;
}
