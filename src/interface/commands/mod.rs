//! # Command Handlers
//!
//! Contains the handler for each conversation transition (greeting, skill selection,
//! answer submission, unrecognized input). These handlers are invoked by the Router.

pub mod answer;
pub mod misc;
pub mod project;
pub mod start;
