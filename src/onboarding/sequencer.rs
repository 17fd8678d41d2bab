//! Step sequencing for the onboarding questionnaire.
//!
//! The sequencer is a plain reducer over a step index in `0..=Step::COUNT`.
//! Views never move the index themselves; they dispatch [`Navigation`]
//! events and read their slice of the session through [`Route`].

use std::collections::BTreeSet;

use log::{debug, warn};

use super::catalog::{ConcernLevel, EffectFrequency, IdealOutcome, ImprovementArea};
use super::session::{DrinksPerDay, SessionState};
use super::step::Step;

/// A value a view hands over together with its advance request
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    PrimaryGoal(String),
    IdealOutcome(IdealOutcome),
    EffectFrequency(EffectFrequency),
    AlcoholConcern(ConcernLevel),
    ImprovementAreas(BTreeSet<ImprovementArea>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Advance(Option<Payload>),
    Retreat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    Stayed,
}

impl Transition {
    pub fn moved(self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// The view bound to the current index, with the session slice it reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    Intro,
    Goals { selected: &'a BTreeSet<String> },
    PrimaryGoal { selected: &'a BTreeSet<String>, primary: Option<&'a str> },
    FocusGoal,
    GoalScience,
    GoalOutcome,
    IdealOutcome { chosen: Option<IdealOutcome> },
    PlanSet,
    GoalsComplete,
    HabitsIntro,
    HabitsDetail,
    DrinksPerDay { drinks: &'a DrinksPerDay },
    WeeklySummary,
    SpendPerDrink { spend: f64 },
    WeeklySpend,
    EffectFrequency { chosen: Option<EffectFrequency> },
    AlcoholConcern { chosen: Option<ConcernLevel> },
    ImprovementAreas { chosen: &'a BTreeSet<ImprovementArea> },
    WeeklyReduction,
    HabitsComplete,
    Complete { session: &'a SessionState },
}

#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    current: usize,
    session: SessionState,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The active step, or `None` once the questionnaire is complete
    pub fn current_step(&self) -> Option<Step> {
        Step::from_index(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current == Step::COUNT
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Typed setters for the active view's optimistic edits
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn dispatch(&mut self, navigation: Navigation) -> Transition {
        match navigation {
            Navigation::Advance(payload) => self.advance(payload),
            Navigation::Retreat => self.retreat(),
        }
    }

    pub fn advance(&mut self, payload: Option<Payload>) -> Transition {
        if self.is_complete() {
            warn!("Advance requested after the final step, ignoring");
            return Transition::Stayed;
        }

        if let Some(payload) = payload {
            self.merge(payload);
        }

        let from = self.current;
        self.current += 1;
        debug!("Step {} -> {}", from, self.current);
        Transition::Moved { from, to: self.current }
    }

    pub fn retreat(&mut self) -> Transition {
        if self.current == 0 {
            return Transition::Stayed;
        }

        let from = self.current;
        self.current -= 1;
        debug!("Step {} -> {}", from, self.current);
        Transition::Moved { from, to: self.current }
    }

    fn merge(&mut self, payload: Payload) {
        let session = &mut self.session;
        match payload {
            Payload::PrimaryGoal(goal) => session.set_primary_goal(goal),
            Payload::IdealOutcome(outcome) => session.set_ideal_outcome(outcome),
            Payload::EffectFrequency(frequency) => session.set_effect_frequency(frequency),
            Payload::AlcoholConcern(level) => session.set_alcohol_concern(level),
            Payload::ImprovementAreas(areas) => session.set_improvement_areas(areas),
        }
    }

    pub fn route(&self) -> Route<'_> {
        let session = &self.session;
        let Some(step) = self.current_step() else {
            return Route::Complete { session };
        };

        match step {
            Step::Intro => Route::Intro,
            Step::Goals => Route::Goals { selected: session.goals() },
            Step::PrimaryGoal => Route::PrimaryGoal {
                selected: session.goals(),
                primary: session.primary_goal(),
            },
            Step::FocusGoal => Route::FocusGoal,
            Step::GoalScience => Route::GoalScience,
            Step::GoalOutcome => Route::GoalOutcome,
            Step::IdealOutcome => Route::IdealOutcome { chosen: session.ideal_outcome() },
            Step::PlanSet => Route::PlanSet,
            Step::GoalsComplete => Route::GoalsComplete,
            Step::HabitsIntro => Route::HabitsIntro,
            Step::HabitsDetail => Route::HabitsDetail,
            Step::DrinksPerDay => Route::DrinksPerDay { drinks: session.drinks_per_day() },
            Step::WeeklySummary => Route::WeeklySummary,
            Step::SpendPerDrink => Route::SpendPerDrink { spend: session.spend_per_drink() },
            Step::WeeklySpend => Route::WeeklySpend,
            Step::EffectFrequency => Route::EffectFrequency { chosen: session.effect_frequency() },
            Step::AlcoholConcern => Route::AlcoholConcern { chosen: session.alcohol_concern() },
            Step::ImprovementAreas => Route::ImprovementAreas { chosen: session.improvement_areas() },
            Step::WeeklyReduction => Route::WeeklyReduction,
            Step::HabitsComplete => Route::HabitsComplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_at_completion_drops_payload() {
        let mut sequencer = StepSequencer::new();
        for _ in 0..Step::COUNT {
            sequencer.advance(None);
        }
        assert!(sequencer.is_complete());

        let transition = sequencer.advance(Some(Payload::PrimaryGoal("Save Money".into())));
        assert_eq!(transition, Transition::Stayed);
        assert_eq!(sequencer.current_index(), Step::COUNT);
        assert_eq!(sequencer.session().primary_goal(), None);
    }

    #[test]
    fn retreat_at_start_stays() {
        let mut sequencer = StepSequencer::new();
        assert_eq!(sequencer.retreat(), Transition::Stayed);
        assert_eq!(sequencer.current_index(), 0);
    }

    #[test]
    fn dispatch_routes_to_advance_and_retreat() {
        let mut sequencer = StepSequencer::new();
        assert!(sequencer.dispatch(Navigation::Advance(None)).moved());
        assert_eq!(
            sequencer.dispatch(Navigation::Retreat),
            Transition::Moved { from: 1, to: 0 }
        );
    }
}
