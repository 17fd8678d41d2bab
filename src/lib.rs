//! Terminal onboarding questionnaire for HealthApp.
//!
//! [`onboarding`] holds the step model and sequencer, [`api`] the backend
//! client, [`tui`] the Elm-style runtime and the questionnaire app built on
//! it, and [`cli`] the command-line surface around them.

pub mod api;
pub mod cli;
pub mod config;
pub mod onboarding;
pub mod tui;
