//! # Session Store
//!
//! In-memory mapping from chat id to the user's active session. Every user has their own
//! slot behind a `tokio::sync::Mutex`, so a whole read-modify-write transition for one user
//! can run under a single guard while other users proceed in parallel.
//!
//! Sessions are not persisted; a restart returns every user to idle.

use crate::domain::types::{ChatId, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, OwnedMutexGuard};

type Slot = Arc<Mutex<Option<Session>>>;

#[derive(Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<ChatId, Slot>>,
    active: Arc<AtomicUsize>,
}

/// Exclusive access to one user's session for the duration of a transition.
pub struct SessionGuard {
    chat_id: ChatId,
    slot: OwnedMutexGuard<Option<Session>>,
    active: Arc<AtomicUsize>,
}

impl SessionGuard {
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn get(&self) -> Option<&Session> {
        self.slot.as_ref()
    }

    /// Stores `session`, returning the one it replaced.
    pub fn put(&mut self, session: Session) -> Option<Session> {
        let previous = self.slot.replace(session);
        if previous.is_none() {
            self.active.fetch_add(1, Ordering::SeqCst);
        }
        previous
    }

    pub fn take(&mut self) -> Option<Session> {
        let previous = self.slot.take();
        if previous.is_some() {
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
        previous
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, chat_id: ChatId) -> Slot {
        self.slots
            .lock()
            .await
            .entry(chat_id)
            .or_default()
            .clone()
    }

    /// Waits for exclusive access to `chat_id`'s session.
    pub async fn lock(&self, chat_id: ChatId) -> SessionGuard {
        let slot = self.slot(chat_id).await;
        SessionGuard {
            chat_id,
            slot: slot.lock_owned().await,
            active: self.active.clone(),
        }
    }

    /// Drops the guard and forgets the slot if the user is idle and nobody is waiting on it.
    pub async fn release(&self, guard: SessionGuard) {
        let chat_id = guard.chat_id;
        drop(guard);

        let mut slots = self.slots.lock().await;
        // Slots are only cloned under the map lock, so a count of one means no waiters.
        let prunable = slots.get(&chat_id).is_some_and(|slot| {
            Arc::strong_count(slot) == 1
                && slot.try_lock().map(|s| s.is_none()).unwrap_or(false)
        });
        if prunable {
            slots.remove(&chat_id);
        }
    }

    #[cfg(test)]
    pub async fn get(&self, chat_id: ChatId) -> Option<Session> {
        let guard = self.lock(chat_id).await;
        let session = guard.get().cloned();
        self.release(guard).await;
        session
    }

    /// Overwrites any prior session for the user.
    #[cfg(test)]
    pub async fn put(&self, chat_id: ChatId, session: Session) {
        let mut guard = self.lock(chat_id).await;
        guard.put(session);
        self.release(guard).await;
    }

    /// No-op when the user has no session.
    #[cfg(test)]
    pub async fn remove(&self, chat_id: ChatId) {
        let mut guard = self.lock(chat_id).await;
        guard.take();
        self.release(guard).await;
    }

    /// Number of users currently awaiting an answer.
    pub fn active_sessions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    async fn tracked_slots(&self) -> usize {
        self.slots.lock().await.len()
    }
}
