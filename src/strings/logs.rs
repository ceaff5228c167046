pub const STARTING: &str = "Starting Mentor...";

pub fn config_loaded(path: &str, skills: usize) -> String {
    format!("Loaded configuration from {path} ({skills} skills in catalog)")
}

pub fn server_listening(addr: &str) -> String {
    format!("Webhook server listening on {addr}")
}

pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn ignored_update(reason: &str) -> String {
    format!("Ignoring webhook update: {reason}")
}

pub fn route_failed(chat_id: i64, err: &str) -> String {
    format!("Failed to route message from {chat_id}: {err}")
}

pub fn send_retry(chat_id: i64, err: &str) -> String {
    format!("Send to {chat_id} failed, retrying once: {err}")
}

pub fn send_dropped(chat_id: i64, err: &str) -> String {
    format!("Dropping message to {chat_id} after retry: {err}")
}

pub fn feedback_failed(err: &str) -> String {
    format!("Feedback request failed: {err}")
}

pub fn session_replaced(chat_id: i64, old_skill: &str, new_skill: &str) -> String {
    format!("Chat {chat_id} switched from '{old_skill}' to '{new_skill}', pending answer discarded")
}
