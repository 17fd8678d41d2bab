use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::constants::{self, USER_AGENT, paths};
use super::models::*;
use crate::config::BackendConfig;
use crate::onboarding::catalog::{ConcernLevel, EffectFrequency, IdealOutcome, ImprovementArea};
use crate::onboarding::DrinksPerDay;

/// Everything the questionnaire reads from or writes to the backend.
///
/// Each call is independent: no retries, no ordering between calls.
#[async_trait]
pub trait OnboardingBackend: Send + Sync {
    async fn save_goals(&self, goals: &[String]) -> Result<()>;
    async fn save_primary_goal(&self, goal: &str) -> Result<()>;
    async fn save_ideal_outcome(&self, outcome: IdealOutcome) -> Result<()>;
    async fn save_drinks(&self, drinks: &DrinksPerDay) -> Result<()>;
    async fn save_spend(&self, spend_per_drink: f64) -> Result<()>;
    async fn save_effect_frequency(&self, frequency: EffectFrequency) -> Result<()>;
    async fn save_alcohol_concern(&self, level: ConcernLevel) -> Result<()>;
    async fn save_improvement_areas(&self, areas: &BTreeSet<ImprovementArea>) -> Result<()>;

    async fn user_selections(&self) -> Result<UserSelections>;
    async fn ideal_outcome(&self) -> Result<IdealOutcomeResponse>;
    async fn drinks_per_day(&self) -> Result<DrinksPerDay>;
    async fn weekly_spend(&self) -> Result<WeeklySpendResponse>;
    async fn total_drinks(&self) -> Result<TotalDrinksResponse>;
}

/// reqwest-backed client for the HealthApp backend
pub struct BackendClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(&config.base_url, http_client))
    }

    pub fn with_custom_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = constants::endpoint(&self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        debug!("POST {} -> {}", path, status);
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Saving to {} failed with status {}: {}", path, status, text);
        }

        info!("Saved {}", path);
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = constants::endpoint(&self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        debug!("GET {} -> {}", path, status);
        if !status.is_success() {
            anyhow::bail!("Fetching {} failed with status {}", path, status);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))
    }
}

#[async_trait]
impl OnboardingBackend for BackendClient {
    async fn save_goals(&self, goals: &[String]) -> Result<()> {
        self.post_json(paths::GOALS, &SaveGoalsRequest { selected_goals: goals })
            .await
    }

    async fn save_primary_goal(&self, goal: &str) -> Result<()> {
        self.post_json(paths::PRIMARY_GOAL, &PrimaryGoalRequest { primary_goal: goal })
            .await
    }

    async fn save_ideal_outcome(&self, outcome: IdealOutcome) -> Result<()> {
        let body = IdealOutcomeRequest { ideal_outcome_id: outcome.id() };
        self.post_json(paths::SAVE_IDEAL_OUTCOME, &body).await
    }

    async fn save_drinks(&self, drinks: &DrinksPerDay) -> Result<()> {
        self.post_json(paths::SAVE_DRINKS, drinks).await
    }

    async fn save_spend(&self, spend_per_drink: f64) -> Result<()> {
        self.post_json(paths::SAVE_SPEND, &SpendRequest { spend_per_drink })
            .await
    }

    async fn save_effect_frequency(&self, frequency: EffectFrequency) -> Result<()> {
        let body = EffectFrequencyRequest { alcohol_effect_frequency: frequency.label() };
        self.post_json(paths::SAVE_ALCOHOL_FREQUENCY, &body).await
    }

    async fn save_alcohol_concern(&self, level: ConcernLevel) -> Result<()> {
        let body = AlcoholConcernRequest { alcohol_concern_level: level.value() };
        self.post_json(paths::SAVE_ALCOHOL_CONCERN, &body).await
    }

    async fn save_improvement_areas(&self, areas: &BTreeSet<ImprovementArea>) -> Result<()> {
        let body = ImprovementAreasRequest {
            selected_areas: areas.iter().map(|area| area.key()).collect(),
        };
        self.post_json(paths::SAVE_IMPROVEMENT_AREAS, &body).await
    }

    async fn user_selections(&self) -> Result<UserSelections> {
        self.get_json(paths::USER_SELECTIONS).await
    }

    async fn ideal_outcome(&self) -> Result<IdealOutcomeResponse> {
        self.get_json(paths::GET_IDEAL_OUTCOME).await
    }

    async fn drinks_per_day(&self) -> Result<DrinksPerDay> {
        let map: serde_json::Map<String, serde_json::Value> =
            self.get_json(paths::DRINKS_PER_DAY).await?;
        Ok(DrinksPerDay::from_backend(&map))
    }

    async fn weekly_spend(&self) -> Result<WeeklySpendResponse> {
        self.get_json(paths::WEEKLY_SPEND).await
    }

    async fn total_drinks(&self) -> Result<TotalDrinksResponse> {
        self.get_json(paths::TOTAL_DRINKS).await
    }
}
