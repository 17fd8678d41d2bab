//! HTTP access to the HealthApp backend.
//!
//! Views talk to the [`OnboardingBackend`] trait; [`BackendClient`] is the
//! reqwest implementation used at runtime.

pub mod client;
pub mod constants;
pub mod models;

pub use client::{BackendClient, OnboardingBackend};
pub use models::{IdealOutcomeResponse, TotalDrinksResponse, UserSelections, WeeklySpendResponse};
