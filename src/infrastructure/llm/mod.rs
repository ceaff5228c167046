//! Simple completion API wrapper
//!
//! Unified interface over OpenAI-compatible chat completion services
//! (OpenAI, Groq, xAI).

mod client;
pub mod providers;
mod types;

pub use client::Client;

pub use types::{Context, Error, Provider, Response, TokenUsage};
