//! # Interface Layer
//!
//! Entry points into the bot: the HTTP routes and the per-transition command handlers.

pub mod commands;
pub mod http;
