//! # Strings Module
//!
//! Centralizes user-facing strings, prompts, and log text.
//! Ensures consistency in messaging and easier updates.

pub mod logs;
pub mod messages;
pub mod prompts;
