//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot:
//! the session store, the conversation state machine, command routing, feedback and delivery.

pub mod feedback;
pub mod machine;
pub mod notifier;
pub mod router;
pub mod state;

#[cfg(test)]
pub mod testing;
