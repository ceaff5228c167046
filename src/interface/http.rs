//! # Webhook Server
//!
//! Axum routes the chat platform and load balancers talk to. The webhook always answers
//! `200 OK`, whatever happened while handling the update, so the platform never redelivers.

use crate::application::router::CommandRouter;
use crate::domain::traits::ChatConnector;
use crate::domain::types::Update;
use crate::strings::{logs, messages};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub chats: Arc<dyn ChatConnector>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    messages::HEALTH_OK
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": state.router.sessions().active_sessions(),
    }))
}

/// Takes the raw body so a malformed payload is acknowledged instead of rejected.
async fn webhook(State(state): State<AppState>, body: Bytes) -> &'static str {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::debug!("{}", logs::ignored_update(&e.to_string()));
            return messages::WEBHOOK_ACK;
        }
    };

    let Some((chat_id, text)) = update.text_message() else {
        tracing::debug!(
            "{}",
            logs::ignored_update(&format!("update {:?} has no text message", update.update_id))
        );
        return messages::WEBHOOK_ACK;
    };

    let chat = state.chats.open(chat_id);
    if let Err(e) = state.router.route(chat.as_ref(), text).await {
        tracing::error!("{}", logs::route_failed(chat_id, &e.to_string()));
    }
    messages::WEBHOOK_ACK
}
