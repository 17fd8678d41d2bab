//! Shared fixtures: an in-memory backend and a driver that runs the app's
//! commands to completion without a terminal.

#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use healthapp_onboarding::api::constants::paths;
use healthapp_onboarding::api::{
    IdealOutcomeResponse, OnboardingBackend, TotalDrinksResponse, UserSelections, WeeklySpendResponse,
};
use healthapp_onboarding::onboarding::catalog::{ConcernLevel, EffectFrequency, IdealOutcome, ImprovementArea};
use healthapp_onboarding::onboarding::{DrinksPerDay, Step, Weekday};
use healthapp_onboarding::tui::apps::onboarding::{Msg, State};
use healthapp_onboarding::tui::apps::{Onboarding, OnboardingFlags};
use healthapp_onboarding::tui::{App, Command};

/// Records every call and answers with fixed data
#[derive(Default)]
pub struct MockBackend {
    pub fail_saves: AtomicBool,
    pub fail_fetches: AtomicBool,
    calls: Mutex<Vec<String>>,
    goals: Mutex<Vec<String>>,
    primary_goal: Mutex<Option<String>>,
    drinks: Mutex<DrinksPerDay>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saved_goals(&self) -> Vec<String> {
        self.goals.lock().unwrap().clone()
    }

    pub fn saved_primary_goal(&self) -> Option<String> {
        self.primary_goal.lock().unwrap().clone()
    }

    pub fn saves_fail(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fetches_fail(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    fn save(&self, path: &str) -> Result<()> {
        self.calls.lock().unwrap().push(path.to_string());
        if self.fail_saves.load(Ordering::SeqCst) {
            bail!("POST {} failed with status 500 Internal Server Error", path);
        }
        Ok(())
    }

    fn fetch(&self, path: &str) -> Result<()> {
        self.calls.lock().unwrap().push(path.to_string());
        if self.fail_fetches.load(Ordering::SeqCst) {
            bail!("GET {} failed with status 503 Service Unavailable", path);
        }
        Ok(())
    }
}

#[async_trait]
impl OnboardingBackend for MockBackend {
    async fn save_goals(&self, goals: &[String]) -> Result<()> {
        self.save(paths::GOALS)?;
        *self.goals.lock().unwrap() = goals.to_vec();
        Ok(())
    }

    async fn save_primary_goal(&self, goal: &str) -> Result<()> {
        self.save(paths::PRIMARY_GOAL)?;
        *self.primary_goal.lock().unwrap() = Some(goal.to_string());
        Ok(())
    }

    async fn save_ideal_outcome(&self, _outcome: IdealOutcome) -> Result<()> {
        self.save(paths::SAVE_IDEAL_OUTCOME)
    }

    async fn save_drinks(&self, drinks: &DrinksPerDay) -> Result<()> {
        self.save(paths::SAVE_DRINKS)?;
        *self.drinks.lock().unwrap() = drinks.clone();
        Ok(())
    }

    async fn save_spend(&self, _spend_per_drink: f64) -> Result<()> {
        self.save(paths::SAVE_SPEND)
    }

    async fn save_effect_frequency(&self, _frequency: EffectFrequency) -> Result<()> {
        self.save(paths::SAVE_ALCOHOL_FREQUENCY)
    }

    async fn save_alcohol_concern(&self, _level: ConcernLevel) -> Result<()> {
        self.save(paths::SAVE_ALCOHOL_CONCERN)
    }

    async fn save_improvement_areas(&self, _areas: &BTreeSet<ImprovementArea>) -> Result<()> {
        self.save(paths::SAVE_IMPROVEMENT_AREAS)
    }

    async fn user_selections(&self) -> Result<UserSelections> {
        self.fetch(paths::USER_SELECTIONS)?;
        Ok(UserSelections {
            primary_goal: self.primary_goal.lock().unwrap().clone(),
        })
    }

    async fn ideal_outcome(&self) -> Result<IdealOutcomeResponse> {
        self.fetch(paths::GET_IDEAL_OUTCOME)?;
        Ok(IdealOutcomeResponse { ideal_outcome_id: Some(1) })
    }

    async fn drinks_per_day(&self) -> Result<DrinksPerDay> {
        self.fetch(paths::DRINKS_PER_DAY)?;
        Ok(self.drinks.lock().unwrap().clone())
    }

    async fn weekly_spend(&self) -> Result<WeeklySpendResponse> {
        self.fetch(paths::WEEKLY_SPEND)?;
        let total = self.drinks.lock().unwrap().total();
        Ok(WeeklySpendResponse { total_per_week: Some(total as f64 * 8.0) })
    }

    async fn total_drinks(&self) -> Result<TotalDrinksResponse> {
        self.fetch(paths::TOTAL_DRINKS)?;
        let total = self.drinks.lock().unwrap().total();
        Ok(TotalDrinksResponse { total_drinks: total as f64 })
    }
}

/// Start the app against `backend` with animations off, running the init command
pub async fn start(backend: Arc<MockBackend>) -> State {
    let (mut state, command) = Onboarding::init(OnboardingFlags {
        backend,
        animations: false,
    });
    drive(&mut state, command).await;
    state
}

/// Run a command and everything it leads to. Returns false if the app quit.
pub async fn drive(state: &mut State, command: Command<Msg>) -> bool {
    let mut queue = VecDeque::from([command]);
    while let Some(command) = queue.pop_front() {
        match command {
            Command::None => {}
            Command::Quit => return false,
            Command::Batch(commands) => queue.extend(commands),
            Command::Perform(future) => {
                let msg = future.await;
                queue.push_back(Onboarding::update(state, msg));
            }
        }
    }
    true
}

/// Deliver one message and drive the resulting command
pub async fn send(state: &mut State, msg: Msg) -> bool {
    let command = Onboarding::update(state, msg);
    drive(state, command).await
}

/// Press Next until `target` is current, answering inputs along the way.
/// Picks the first goal, and three drinks on Monday.
pub async fn walk_to(state: &mut State, target: Option<Step>) {
    for _ in 0..64 {
        let current = state.sequencer().current_step();
        if current == target {
            return;
        }
        match current {
            Some(Step::Goals) if state.sequencer().session().goals().is_empty() => {
                send(state, Msg::Select(0)).await;
            }
            Some(Step::DrinksPerDay)
                if state.view().day == Weekday::Monday.index()
                    && state.sequencer().session().drinks_per_day().total() == 0 =>
            {
                send(state, Msg::Input('3')).await;
            }
            _ => {}
        }
        send(state, Msg::Next).await;
    }
    panic!("never reached {:?}, stuck at {:?}", target, state.sequencer().current_step());
}
