//! The questionnaire as a TUI app.
//!
//! `update` owns all navigation: keys become [`Msg`]s, saving steps fire a
//! backend write and only advance the [`StepSequencer`] once it succeeds,
//! and every step entry starts a fresh [`ViewState`] plus whatever fetch the
//! step needs. Backend responses carry the [`Visit`] that issued them so a
//! late answer for a step the user already left is dropped.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use log::{error, info, warn};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use crate::api::OnboardingBackend;
use crate::onboarding::catalog::{ConcernLevel, EffectFrequency, GOALS, GoalInfo, IdealOutcome, ImprovementArea};
use crate::onboarding::{input, Navigation, Payload, SessionState, Step, StepSequencer, Weekday};
use crate::tui::{App, Command, Element, Resource, Subscription, Theme};

mod effects;
mod views;

pub use effects::{RemoteData, SaveRequest};

pub const TICK: Duration = Duration::from_millis(100);

/// Intro reveals one progress section every 400ms
const INTRO_TICKS_PER_SECTION: u32 = 4;
/// Habits intro reveals one topic every 300ms
const HABIT_TICKS_PER_TOPIC: u32 = 3;
/// Completion pages show their check mark after 1.5s
const CHECK_DELAY_TICKS: u32 = 15;
/// Tick count used when animations are off
const REVEALED: u32 = 1_000;

const HABIT_TOPICS: [&str; 5] = [
    "Drinks per day",
    "Spending",
    "After-effects",
    "Concern",
    "Areas to improve",
];

pub struct Onboarding;

/// Startup values for [`Onboarding`]
pub struct OnboardingFlags {
    pub backend: Arc<dyn OnboardingBackend>,
    pub animations: bool,
}

/// One entry into a step. Re-entering the same step yields a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub step: Step,
    pub id: u64,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Tick,
    CursorUp,
    CursorDown,
    Toggle,
    /// Mouse pick of an option row
    Select(usize),
    Next,
    /// Sub-page or weekday navigation within a step
    Previous,
    Back,
    Input(char),
    Backspace,
    DismissAlert,
    Saved {
        visit: Visit,
        result: Result<(), String>,
        payload: Option<Payload>,
    },
    Fetched {
        visit: Visit,
        result: Result<RemoteData, String>,
    },
    Quit,
}

/// Per-step scratch state, rebuilt on every step entry
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub cursor: usize,
    pub ticks: u32,
    pub page: usize,
    pub day: usize,
    pub spend_input: String,
    pub areas: BTreeSet<ImprovementArea>,
    pub remote: Resource<RemoteData>,
}

impl ViewState {
    fn entering(step: Step, session: &SessionState, animations: bool) -> Self {
        let cursor = match step {
            Step::PrimaryGoal => session
                .primary_goal()
                .and_then(|goal| primary_options(session).iter().position(|g| g.key == goal)),
            Step::IdealOutcome => session
                .ideal_outcome()
                .and_then(|o| IdealOutcome::ALL.iter().position(|x| *x == o)),
            Step::EffectFrequency => session
                .effect_frequency()
                .and_then(|f| EffectFrequency::ALL.iter().position(|x| *x == f)),
            Step::AlcoholConcern => session
                .alcohol_concern()
                .and_then(|c| ConcernLevel::ALL.iter().position(|x| *x == c)),
            _ => None,
        };

        let spend = session.spend_per_drink().to_string();
        let spend_input = if step == Step::SpendPerDrink && input::is_valid_spend(&spend) {
            spend
        } else {
            String::new()
        };

        Self {
            cursor: cursor.unwrap_or(0),
            ticks: if animations { 0 } else { REVEALED },
            page: 0,
            day: 0,
            spend_input,
            areas: session.improvement_areas().clone(),
            remote: Resource::NotAsked,
        }
    }
}

pub struct State {
    backend: Arc<dyn OnboardingBackend>,
    sequencer: StepSequencer,
    view: ViewState,
    visit: u64,
    saving: bool,
    save_failed: bool,
    alert: Option<String>,
    animations: bool,
}

impl State {
    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn save_failed(&self) -> bool {
        self.save_failed
    }

    /// The visit responses must match to be applied; `None` once complete
    pub fn current_visit(&self) -> Option<Visit> {
        self.sequencer.current_step().map(|step| Visit { step, id: self.visit })
    }

    /// Whether Next would do anything right now
    pub fn can_advance(&self) -> bool {
        if self.saving || self.alert.is_some() {
            return false;
        }
        let Some(step) = self.sequencer.current_step() else {
            return true;
        };
        let session = self.sequencer.session();

        match step {
            Step::Goals => !session.goals().is_empty(),
            Step::PrimaryGoal => self.view.cursor < primary_options(session).len(),
            Step::SpendPerDrink => input::parse_spend(&self.view.spend_input).is_some(),
            Step::GoalsComplete | Step::HabitsComplete => self.view.ticks >= CHECK_DELAY_TICKS,
            Step::PlanSet | Step::WeeklySummary | Step::WeeklySpend | Step::WeeklyReduction => {
                !self.view.remote.is_loading()
            }
            _ => true,
        }
    }

    fn option_count(&self, step: Step) -> usize {
        match step {
            Step::Goals => GOALS.len(),
            Step::PrimaryGoal => primary_options(self.sequencer.session()).len(),
            Step::IdealOutcome => IdealOutcome::ALL.len(),
            Step::EffectFrequency => EffectFrequency::ALL.len(),
            Step::AlcoholConcern => ConcernLevel::ALL.len(),
            Step::ImprovementAreas => ImprovementArea::ALL.len(),
            _ => 0,
        }
    }

    fn needs_tick(&self) -> bool {
        if self.view.remote.is_loading() {
            return true;
        }
        if !self.animations {
            return false;
        }
        let reveal_end = match self.sequencer.current_step() {
            Some(Step::Intro) => INTRO_TICKS_PER_SECTION * crate::onboarding::Section::ALL.len() as u32,
            Some(Step::HabitsIntro) => HABIT_TICKS_PER_TOPIC * HABIT_TOPICS.len() as u32,
            Some(Step::GoalsComplete) | Some(Step::HabitsComplete) => CHECK_DELAY_TICKS,
            _ => 0,
        };
        self.view.ticks < reveal_end
    }

    /// Reset per-step state and start the step's fetch, if it has one
    fn enter(&mut self) -> Command<Msg> {
        self.visit += 1;
        self.saving = false;
        self.save_failed = false;

        let Some(step) = self.sequencer.current_step() else {
            self.view = ViewState::default();
            info!("Questionnaire complete");
            return Command::None;
        };

        let view = ViewState::entering(step, self.sequencer.session(), self.animations);
        self.view = view;

        match effects::fetch_for(step, self.backend.clone()) {
            Some(fetch) => {
                self.view.remote = Resource::Loading;
                let visit = Visit { step, id: self.visit };
                Command::perform(fetch, move |result| Msg::Fetched {
                    visit,
                    result: result.map_err(|e| format!("{:#}", e)),
                })
            }
            None => Command::None,
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> Command<Msg> {
        if self.sequencer.dispatch(navigation).moved() {
            self.enter()
        } else {
            Command::None
        }
    }

    fn save(&mut self, step: Step, request: Option<SaveRequest>, payload: Option<Payload>) -> Command<Msg> {
        let Some(request) = request else {
            warn!("{} has no save request, advancing without saving", step);
            return self.navigate(Navigation::Advance(payload));
        };

        self.saving = true;
        self.save_failed = false;
        info!("Saving {} to {}", step, step.save_endpoint().unwrap_or("backend"));

        let visit = Visit { step, id: self.visit };
        let backend = self.backend.clone();
        Command::perform(request.send(backend), move |result| Msg::Saved {
            visit,
            result: result.map_err(|e| format!("{:#}", e)),
            payload,
        })
    }

    fn next(&mut self) -> Command<Msg> {
        let Some(step) = self.sequencer.current_step() else {
            return Command::Quit;
        };
        if !self.can_advance() {
            return Command::None;
        }

        let cursor = self.view.cursor;
        match step {
            Step::DrinksPerDay if self.view.day + 1 < Weekday::ALL.len() => {
                self.view.day += 1;
                Command::None
            }
            Step::SpendPerDrink => {
                if let Some(amount) = input::parse_spend(&self.view.spend_input) {
                    self.sequencer.session_mut().set_spend_per_drink(amount);
                }
                let request = SaveRequest::from_session(step, self.sequencer.session());
                self.save(step, request, None)
            }
            Step::Goals | Step::DrinksPerDay => {
                let request = SaveRequest::from_session(step, self.sequencer.session());
                self.save(step, request, None)
            }
            Step::PrimaryGoal => {
                let Some(goal) = primary_options(self.sequencer.session()).get(cursor).map(|g| g.key.to_string()) else {
                    return Command::None;
                };
                self.save(step, Some(SaveRequest::PrimaryGoal(goal.clone())), Some(Payload::PrimaryGoal(goal)))
            }
            Step::IdealOutcome => match IdealOutcome::ALL.get(cursor).copied() {
                Some(outcome) => self.save(
                    step,
                    Some(SaveRequest::IdealOutcome(outcome)),
                    Some(Payload::IdealOutcome(outcome)),
                ),
                None => Command::None,
            },
            Step::EffectFrequency => match EffectFrequency::ALL.get(cursor).copied() {
                Some(frequency) => self.save(
                    step,
                    Some(SaveRequest::EffectFrequency(frequency)),
                    Some(Payload::EffectFrequency(frequency)),
                ),
                None => Command::None,
            },
            Step::AlcoholConcern => match ConcernLevel::ALL.get(cursor).copied() {
                Some(level) => self.save(
                    step,
                    Some(SaveRequest::AlcoholConcern(level)),
                    Some(Payload::AlcoholConcern(level)),
                ),
                None => Command::None,
            },
            Step::ImprovementAreas => {
                let areas = self.view.areas.clone();
                self.save(
                    step,
                    Some(SaveRequest::ImprovementAreas(areas.clone())),
                    Some(Payload::ImprovementAreas(areas)),
                )
            }
            Step::HabitsDetail if self.view.page == 0 => {
                self.view.page = 1;
                Command::None
            }
            _ => self.navigate(Navigation::Advance(None)),
        }
    }

    fn move_cursor(&mut self, up: bool) {
        let Some(step) = self.sequencer.current_step() else {
            return;
        };

        if step == Step::DrinksPerDay {
            if let Some(day) = Weekday::from_index(self.view.day) {
                let count = self.sequencer.session().drinks_per_day().get(day);
                let count = if up {
                    (count + 1).min(input::MAX_DRINKS_PER_DAY)
                } else {
                    count.saturating_sub(1)
                };
                self.sequencer.session_mut().set_drinks(day, count);
            }
            return;
        }

        let count = self.option_count(step);
        if count == 0 {
            return;
        }
        self.view.cursor = if up {
            self.view.cursor.checked_sub(1).unwrap_or(count - 1)
        } else {
            (self.view.cursor + 1) % count
        };
    }

    fn toggle(&mut self) {
        match self.sequencer.current_step() {
            Some(Step::Goals) => {
                if let Some(goal) = GOALS.get(self.view.cursor) {
                    self.sequencer.session_mut().toggle_goal(goal.key);
                }
            }
            Some(Step::ImprovementAreas) => {
                if let Some(area) = ImprovementArea::ALL.get(self.view.cursor).copied() {
                    if !self.view.areas.remove(&area) {
                        self.view.areas.insert(area);
                    }
                }
            }
            _ => {}
        }
    }

    fn type_char(&mut self, key: char) {
        match self.sequencer.current_step() {
            Some(Step::DrinksPerDay) => {
                if let Some(day) = Weekday::from_index(self.view.day) {
                    let count = self.sequencer.session().drinks_per_day().get(day);
                    self.sequencer.session_mut().set_drinks(day, input::push_drink_digit(count, key));
                }
            }
            Some(Step::SpendPerDrink) => {
                if let Some(next) = input::push_spend_char(&self.view.spend_input, key) {
                    self.view.spend_input = next;
                }
            }
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.sequencer.current_step() {
            Some(Step::DrinksPerDay) => {
                if let Some(day) = Weekday::from_index(self.view.day) {
                    let count = self.sequencer.session().drinks_per_day().get(day);
                    self.sequencer.session_mut().set_drinks(day, input::pop_drink_digit(count));
                }
            }
            Some(Step::SpendPerDrink) => {
                self.view.spend_input.pop();
            }
            _ => {}
        }
    }

    fn previous(&mut self) {
        match self.sequencer.current_step() {
            Some(Step::DrinksPerDay) => self.view.day = self.view.day.saturating_sub(1),
            Some(Step::HabitsDetail) => self.view.page = 0,
            _ => {}
        }
    }

    fn is_current(&self, visit: Visit, what: &str) -> bool {
        if self.current_visit() == Some(visit) {
            return true;
        }
        warn!("Ignoring stale {} response for {} (visit {})", what, visit.step, visit.id);
        false
    }
}

/// PrimaryGoal choices: the selected goals in catalog order
fn primary_options(session: &SessionState) -> Vec<&'static GoalInfo> {
    GOALS.iter().filter(|goal| session.is_goal_selected(goal.key)).collect()
}

impl App for Onboarding {
    type Flags = OnboardingFlags;
    type State = State;
    type Msg = Msg;

    fn init(flags: OnboardingFlags) -> (State, Command<Msg>) {
        let mut state = State {
            backend: flags.backend,
            sequencer: StepSequencer::new(),
            view: ViewState::default(),
            visit: 0,
            saving: false,
            save_failed: false,
            alert: None,
            animations: flags.animations,
        };
        let command = state.enter();
        (state, command)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        let input_blocked = state.alert.is_some();

        match msg {
            Msg::Saved { visit, result, payload } => {
                if !state.is_current(visit, "save") {
                    return Command::None;
                }
                state.saving = false;
                match result {
                    Ok(()) => {
                        info!("Saved {}", visit.step);
                        state.navigate(Navigation::Advance(payload))
                    }
                    Err(e) => {
                        error!("Saving {} failed: {}", visit.step, e);
                        state.save_failed = true;
                        if let Some(message) = visit.step.save_failure_alert() {
                            state.alert = Some(message.to_string());
                        }
                        Command::None
                    }
                }
            }

            Msg::Fetched { visit, result } => {
                if !state.is_current(visit, "fetch") {
                    return Command::None;
                }
                if let Err(e) = &result {
                    error!("Loading data for {} failed: {}", visit.step, e);
                }
                state.view.remote = Resource::from_result(result);
                Command::None
            }

            Msg::Tick => {
                state.view.ticks = state.view.ticks.saturating_add(1);
                Command::None
            }

            Msg::DismissAlert => {
                state.alert = None;
                Command::None
            }

            Msg::Quit => Command::Quit,

            _ if input_blocked => Command::None,

            Msg::CursorUp => {
                state.move_cursor(true);
                Command::None
            }
            Msg::CursorDown => {
                state.move_cursor(false);
                Command::None
            }
            Msg::Toggle => {
                state.toggle();
                Command::None
            }
            Msg::Select(index) => {
                let multi = matches!(state.sequencer.current_step(), Some(Step::Goals | Step::ImprovementAreas));
                let Some(step) = state.sequencer.current_step() else {
                    return Command::None;
                };
                if index >= state.option_count(step) {
                    return Command::None;
                }
                state.view.cursor = index;
                if multi {
                    state.toggle();
                    Command::None
                } else {
                    state.next()
                }
            }
            Msg::Next => state.next(),
            Msg::Previous => {
                state.previous();
                Command::None
            }
            Msg::Back => state.navigate(Navigation::Retreat),
            Msg::Input(key) => {
                state.type_char(key);
                Command::None
            }
            Msg::Backspace => {
                state.backspace();
                Command::None
            }
        }
    }

    fn view(state: &State, theme: &Theme) -> Element<Msg> {
        views::render(state, theme)
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        if state.alert.is_some() {
            return vec![
                Subscription::keyboard(KeyCode::Enter, "OK", Msg::DismissAlert),
                Subscription::keyboard(KeyCode::Esc, "", Msg::DismissAlert),
            ];
        }

        let mut subs = Vec::new();

        let Some(step) = state.sequencer.current_step() else {
            subs.push(Subscription::keyboard(KeyCode::Enter, "Exit", Msg::Quit));
            subs.push(Subscription::keyboard(KeyCode::Char('q'), "", Msg::Quit));
            subs.push(Subscription::keyboard(KeyCode::Esc, "Back", Msg::Back));
            return subs;
        };

        if state.option_count(step) > 0 {
            subs.push(Subscription::keyboard(KeyCode::Up, "", Msg::CursorUp));
            subs.push(Subscription::keyboard(KeyCode::Down, "Move", Msg::CursorDown));
        }

        match step {
            Step::Goals | Step::ImprovementAreas => {
                subs.push(Subscription::keyboard(KeyCode::Char(' '), "Toggle", Msg::Toggle));
            }
            Step::DrinksPerDay => {
                for digit in '0'..='9' {
                    subs.push(Subscription::keyboard(KeyCode::Char(digit), "", Msg::Input(digit)));
                }
                subs.push(Subscription::keyboard(KeyCode::Up, "", Msg::CursorUp));
                subs.push(Subscription::keyboard(KeyCode::Down, "+/-", Msg::CursorDown));
                subs.push(Subscription::keyboard(KeyCode::Backspace, "Delete", Msg::Backspace));
                subs.push(Subscription::keyboard(KeyCode::Left, "", Msg::Previous));
                subs.push(Subscription::keyboard(KeyCode::Right, "Day", Msg::Next));
            }
            Step::SpendPerDrink => {
                for key in ('0'..='9').chain(std::iter::once('.')) {
                    subs.push(Subscription::keyboard(KeyCode::Char(key), "", Msg::Input(key)));
                }
                subs.push(Subscription::keyboard(KeyCode::Backspace, "Delete", Msg::Backspace));
            }
            Step::HabitsDetail => {
                subs.push(Subscription::keyboard(KeyCode::Left, "Page", Msg::Previous));
            }
            _ => {}
        }

        subs.push(Subscription::keyboard(KeyCode::Enter, "Next", Msg::Next));
        if state.sequencer.current_index() > 0 {
            subs.push(Subscription::keyboard(KeyCode::Esc, "Back", Msg::Back));
        }

        if state.needs_tick() {
            subs.push(Subscription::timer(TICK, Msg::Tick));
        }

        subs
    }

    fn title() -> &'static str {
        "HealthApp Onboarding"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let mut spans = match state.sequencer.current_step() {
            Some(step) => vec![Span::styled(
                format!("Step {}/{} · {}", step.index() + 1, Step::COUNT, step.section().label()),
                Style::default().fg(theme.subtext0),
            )],
            None => vec![Span::styled("Complete", Style::default().fg(theme.green).bold())],
        };

        if state.saving {
            spans.push(Span::styled("  Saving…", Style::default().fg(theme.yellow)));
        } else if state.save_failed {
            spans.push(Span::styled("  Last save failed", Style::default().fg(theme.red)));
        }

        Some(Line::from(spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{IdealOutcomeResponse, TotalDrinksResponse, UserSelections, WeeklySpendResponse};
    use crate::onboarding::DrinksPerDay;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl OnboardingBackend for Offline {
        async fn save_goals(&self, _: &[String]) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_primary_goal(&self, _: &str) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_ideal_outcome(&self, _: IdealOutcome) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_drinks(&self, _: &DrinksPerDay) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_spend(&self, _: f64) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_effect_frequency(&self, _: EffectFrequency) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_alcohol_concern(&self, _: ConcernLevel) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn save_improvement_areas(&self, _: &BTreeSet<ImprovementArea>) -> anyhow::Result<()> { anyhow::bail!("offline") }
        async fn user_selections(&self) -> anyhow::Result<UserSelections> { anyhow::bail!("offline") }
        async fn ideal_outcome(&self) -> anyhow::Result<IdealOutcomeResponse> { anyhow::bail!("offline") }
        async fn drinks_per_day(&self) -> anyhow::Result<DrinksPerDay> { anyhow::bail!("offline") }
        async fn weekly_spend(&self) -> anyhow::Result<WeeklySpendResponse> { anyhow::bail!("offline") }
        async fn total_drinks(&self) -> anyhow::Result<TotalDrinksResponse> { anyhow::bail!("offline") }
    }

    fn offline_state() -> State {
        let (state, command) = Onboarding::init(OnboardingFlags {
            backend: Arc::new(Offline),
            animations: false,
        });
        assert!(command.is_none());
        state
    }

    #[test]
    fn goals_next_requires_a_selection() {
        let mut state = offline_state();
        Onboarding::update(&mut state, Msg::Next);
        assert_eq!(state.sequencer().current_step(), Some(Step::Goals));

        assert!(Onboarding::update(&mut state, Msg::Next).is_none());
        assert!(!state.is_saving());

        Onboarding::update(&mut state, Msg::Toggle);
        assert!(state.can_advance());
        assert!(!Onboarding::update(&mut state, Msg::Next).is_none());
        assert!(state.is_saving());
    }

    #[test]
    fn alert_blocks_input_until_dismissed() {
        let mut state = offline_state();
        Onboarding::update(&mut state, Msg::Next);
        let visit = state.current_visit().unwrap();

        Onboarding::update(
            &mut state,
            Msg::Saved { visit, result: Err("500".into()), payload: None },
        );
        assert_eq!(state.alert(), Step::Goals.save_failure_alert());

        Onboarding::update(&mut state, Msg::Back);
        assert_eq!(state.sequencer().current_step(), Some(Step::Goals));

        Onboarding::update(&mut state, Msg::DismissAlert);
        Onboarding::update(&mut state, Msg::Back);
        assert_eq!(state.sequencer().current_step(), Some(Step::Intro));
    }

    #[test]
    fn drinks_step_walks_the_week_before_saving() {
        let mut state = offline_state();
        for _ in 0..Step::DrinksPerDay.index() {
            state.sequencer.advance(None);
        }
        state.enter();

        Onboarding::update(&mut state, Msg::Input('3'));
        for _ in 0..6 {
            assert!(Onboarding::update(&mut state, Msg::Next).is_none());
        }
        assert_eq!(state.view().day, 6);
        assert_eq!(state.sequencer().session().drinks_per_day().get(Weekday::Monday), 3);

        assert!(!Onboarding::update(&mut state, Msg::Next).is_none());
        assert!(state.is_saving());
    }

    #[test]
    fn completion_check_gates_next() {
        let mut state = offline_state();
        state.animations = true;
        for _ in 0..Step::GoalsComplete.index() {
            state.sequencer.advance(None);
        }
        state.enter();
        assert!(!state.can_advance());

        for _ in 0..CHECK_DELAY_TICKS {
            Onboarding::update(&mut state, Msg::Tick);
        }
        assert!(state.can_advance());
    }
}
