//! Navigation and session properties of the questionnaire core

use healthapp_onboarding::onboarding::{
    DrinksPerDay, Navigation, Payload, Route, SessionState, Step, StepSequencer, Transition, Weekday, WeeklySummary,
};

fn sequencer_at(index: usize) -> StepSequencer {
    let mut sequencer = StepSequencer::new();
    for _ in 0..index {
        sequencer.advance(None);
    }
    assert_eq!(sequencer.current_index(), index);
    sequencer
}

/// Every step below completion advances by exactly one
#[test]
fn advance_moves_forward_one_step() {
    for k in 0..Step::COUNT {
        let mut sequencer = sequencer_at(k);
        assert_eq!(sequencer.advance(None), Transition::Moved { from: k, to: k + 1 });
    }
}

/// Every step above the first retreats by exactly one, including completion
#[test]
fn retreat_moves_back_one_step() {
    for k in 1..=Step::COUNT {
        let mut sequencer = sequencer_at(k);
        assert_eq!(sequencer.dispatch(Navigation::Retreat), Transition::Moved { from: k, to: k - 1 });
    }
}

/// Only the completion index maps to the recap route
#[test]
fn every_index_routes_to_one_view() {
    for k in 0..Step::COUNT {
        let sequencer = sequencer_at(k);
        assert!(!matches!(sequencer.route(), Route::Complete { .. }), "index {}", k);
    }
    assert!(matches!(sequencer_at(Step::COUNT).route(), Route::Complete { .. }));
}

#[test]
fn fresh_week_has_every_day_at_zero() {
    let drinks = DrinksPerDay::default();
    assert_eq!(drinks.iter().count(), 7);
    assert!(drinks.iter().all(|(_, count)| count == 0));
}

#[test]
fn setting_one_day_leaves_the_others() {
    for day in Weekday::ALL {
        let mut drinks = DrinksPerDay::default();
        drinks.set(day, 4);
        for (other, count) in drinks.iter() {
            assert_eq!(count, if other == day { 4 } else { 0 });
        }
    }
}

#[test]
fn toggling_a_goal_twice_restores_the_set() {
    let mut session = SessionState::default();
    session.toggle_goal("Avoid Hangovers");
    let before = session.goals().clone();

    session.toggle_goal("Save Money");
    session.toggle_goal("Save Money");
    assert_eq!(session.goals(), &before);
}

/// Intro, pick "Save Money", then advance with it as the primary goal
#[test]
fn primary_goal_payload_is_merged_on_advance() {
    let mut sequencer = StepSequencer::new();
    sequencer.dispatch(Navigation::Advance(None));
    assert_eq!(sequencer.current_step(), Some(Step::Goals));
    assert!(sequencer.session().goals().is_empty());

    sequencer.session_mut().toggle_goal("Save Money");
    let transition = sequencer.dispatch(Navigation::Advance(Some(Payload::PrimaryGoal("Save Money".into()))));

    assert!(transition.moved());
    assert_eq!(sequencer.current_index(), 2);
    assert_eq!(sequencer.session().primary_goal(), Some("Save Money"));
    match sequencer.route() {
        Route::PrimaryGoal { selected, primary } => {
            assert!(selected.contains("Save Money"));
            assert_eq!(primary, Some("Save Money"));
        }
        _ => panic!("expected the primary goal route"),
    }
}

#[test]
fn one_drinking_day_summary() {
    let mut drinks = DrinksPerDay::default();
    drinks.set(Weekday::Monday, 3);

    let summary = WeeklySummary::from_drinks(&drinks);
    assert_eq!(summary.total_drinks, 3);
    assert_eq!(summary.dry_days, 6);
}
