//! Request and response bodies exchanged with the backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGoalsRequest<'a> {
    pub selected_goals: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryGoalRequest<'a> {
    pub primary_goal: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealOutcomeRequest {
    pub ideal_outcome_id: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRequest {
    pub spend_per_drink: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlcoholConcernRequest {
    pub alcohol_concern_level: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectFrequencyRequest<'a> {
    pub alcohol_effect_frequency: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementAreasRequest<'a> {
    pub selected_areas: Vec<&'a str>,
}

/// The user's stored primary goal. Other fields in the reply are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSelections {
    #[serde(default)]
    pub primary_goal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySpendResponse {
    #[serde(default)]
    pub total_per_week: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalDrinksResponse {
    pub total_drinks: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealOutcomeResponse {
    #[serde(default)]
    pub ideal_outcome_id: Option<u8>,
}
