//! Backend calls issued by the questionnaire, expressed as owned requests so
//! they can outlive the state borrow that produced them.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;

use crate::api::{OnboardingBackend, UserSelections};
use crate::onboarding::catalog::{ConcernLevel, EffectFrequency, IdealOutcome, ImprovementArea};
use crate::onboarding::{DrinksPerDay, SessionState, Step};

/// Data a step loads when it is entered
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteData {
    Selections(UserSelections),
    IdealOutcome(Option<IdealOutcome>),
    Drinks(DrinksPerDay),
    WeeklySpend(Option<f64>),
    TotalDrinks(f64),
}

/// A write to the backend, one variant per saving step
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Goals(Vec<String>),
    PrimaryGoal(String),
    IdealOutcome(IdealOutcome),
    Drinks(DrinksPerDay),
    Spend(f64),
    EffectFrequency(EffectFrequency),
    AlcoholConcern(ConcernLevel),
    ImprovementAreas(BTreeSet<ImprovementArea>),
}

impl SaveRequest {
    /// Goals, drinks and spend are written from the session, which already
    /// carries the optimistic edit.
    pub fn from_session(step: Step, session: &SessionState) -> Option<Self> {
        match step {
            Step::Goals => Some(SaveRequest::Goals(session.goals().iter().cloned().collect())),
            Step::DrinksPerDay => Some(SaveRequest::Drinks(session.drinks_per_day().clone())),
            Step::SpendPerDrink => Some(SaveRequest::Spend(session.spend_per_drink())),
            _ => None,
        }
    }

    pub async fn send(self, backend: Arc<dyn OnboardingBackend>) -> Result<()> {
        match self {
            SaveRequest::Goals(goals) => backend.save_goals(&goals).await,
            SaveRequest::PrimaryGoal(goal) => backend.save_primary_goal(&goal).await,
            SaveRequest::IdealOutcome(outcome) => backend.save_ideal_outcome(outcome).await,
            SaveRequest::Drinks(drinks) => backend.save_drinks(&drinks).await,
            SaveRequest::Spend(amount) => backend.save_spend(amount).await,
            SaveRequest::EffectFrequency(frequency) => backend.save_effect_frequency(frequency).await,
            SaveRequest::AlcoholConcern(level) => backend.save_alcohol_concern(level).await,
            SaveRequest::ImprovementAreas(areas) => backend.save_improvement_areas(&areas).await,
        }
    }
}

/// Load whatever `step` displays from the backend. `None` for steps that
/// render from local state only.
pub fn fetch_for(step: Step, backend: Arc<dyn OnboardingBackend>) -> Option<impl Future<Output = Result<RemoteData>> + Send> {
    step.fetch_endpoint()?;

    Some(async move {
        let data = match step {
            Step::FocusGoal | Step::GoalScience | Step::GoalOutcome => {
                RemoteData::Selections(backend.user_selections().await?)
            }
            Step::PlanSet => {
                let response = backend.ideal_outcome().await?;
                RemoteData::IdealOutcome(response.ideal_outcome_id.and_then(IdealOutcome::from_id))
            }
            Step::WeeklySummary => RemoteData::Drinks(backend.drinks_per_day().await?),
            Step::WeeklySpend => RemoteData::WeeklySpend(backend.weekly_spend().await?.total_per_week),
            Step::WeeklyReduction => RemoteData::TotalDrinks(backend.total_drinks().await?.total_drinks),
            other => anyhow::bail!("{} has nothing to fetch", other),
        };
        Ok(data)
    })
}
