//! # Conversation State Machine
//!
//! Classifies an incoming text and maps `(state, input)` to the transition the router
//! performs. The table is the single place that decides precedence between greeting,
//! skill selection and answer submission.

use crate::domain::catalog::{Project, ProjectCatalog};
use crate::domain::types::Session;

/// Per-user state, derived from the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingAnswer,
}

impl SessionState {
    pub fn of(session: Option<&Session>) -> Self {
        match session {
            Some(_) => SessionState::AwaitingAnswer,
            None => SessionState::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    Greeting,
    Skill(&'a Project),
    Text(&'a str),
}

impl<'a> Input<'a> {
    /// Exact matches only: no trimming, no case folding.
    pub fn classify(text: &'a str, greeting: &str, catalog: &'a ProjectCatalog) -> Self {
        if text == greeting {
            Input::Greeting
        } else if let Some(project) = catalog.lookup(text) {
            Input::Skill(project)
        } else {
            Input::Text(text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition<'a> {
    /// Send the skill list. Session untouched.
    Welcome,
    /// Create or overwrite the session, send the project. Ends in `AwaitingAnswer`.
    AssignProject(&'a Project),
    /// Request feedback, send it, clear the session, re-offer skills. Ends in `Idle`.
    SubmitAnswer(&'a str),
    /// Send the guidance message. State unchanged.
    Unrecognized,
}

impl Transition<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Transition::Welcome => "welcome",
            Transition::AssignProject(_) => "assign_project",
            Transition::SubmitAnswer(_) => "submit_answer",
            Transition::Unrecognized => "unrecognized",
        }
    }
}

/// The transition table.
///
/// A skill name received while `AwaitingAnswer` starts the new project; it is never taken
/// as the answer to the pending one.
pub fn transition<'a>(state: SessionState, input: Input<'a>) -> Transition<'a> {
    match (state, input) {
        (_, Input::Greeting) => Transition::Welcome,
        (_, Input::Skill(project)) => Transition::AssignProject(project),
        (SessionState::AwaitingAnswer, Input::Text(answer)) => Transition::SubmitAnswer(answer),
        (SessionState::Idle, Input::Text(_)) => Transition::Unrecognized,
    }
}
