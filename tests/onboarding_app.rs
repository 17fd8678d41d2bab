//! End-to-end questionnaire flows against an in-memory backend

mod common;

use anyhow::Result;

use common::{MockBackend, drive, send, start, walk_to};
use healthapp_onboarding::api::constants::paths;
use healthapp_onboarding::onboarding::catalog::{GOALS, IdealOutcome};
use healthapp_onboarding::onboarding::{Step, Weekday};
use healthapp_onboarding::tui::apps::Onboarding;
use healthapp_onboarding::tui::apps::onboarding::{Msg, RemoteData};
use healthapp_onboarding::tui::{App, Resource};

fn goal_index(label: &str) -> usize {
    GOALS.iter().position(|goal| goal.label == label).unwrap()
}

/// Selecting a goal and its primary goal writes both and stores the primary
#[tokio::test]
async fn goal_selection_reaches_focus_goal() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::Intro));

    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::Goals));
    assert!(state.sequencer().session().goals().is_empty());

    send(&mut state, Msg::Select(goal_index("Save Money"))).await;
    assert!(state.sequencer().session().is_goal_selected("Save Money"));

    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::PrimaryGoal));

    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::FocusGoal));
    assert_eq!(state.sequencer().session().primary_goal(), Some("Save Money"));

    // Entering FocusGoal fetched the stored selections
    match &state.view().remote {
        Resource::Success(RemoteData::Selections(selections)) => {
            assert_eq!(selections.primary_goal.as_deref(), Some("Save Money"));
        }
        other => panic!("unexpected remote state {:?}", other),
    }
    assert_eq!(
        backend.calls(),
        vec![paths::GOALS, paths::PRIMARY_GOAL, paths::USER_SELECTIONS]
    );
    Ok(())
}

/// Goals go to the backend under their stored keys, not their display labels
#[tokio::test]
async fn goals_are_saved_under_backend_keys() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::Goals)).await;

    send(&mut state, Msg::Select(goal_index("Reduce Stress and Anxiety"))).await;
    send(&mut state, Msg::Next).await;
    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::FocusGoal));

    assert_eq!(backend.saved_goals(), vec!["Reduce Stress and Anxietyy".to_string()]);
    assert_eq!(backend.saved_primary_goal().as_deref(), Some("Reduce Stress and Anxietyy"));
    assert_eq!(state.sequencer().session().primary_goal(), Some("Reduce Stress and Anxietyy"));
    Ok(())
}

/// A primary goal save failure uses that step's own alert text
#[tokio::test]
async fn failed_primary_goal_save_alerts_with_its_message() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::PrimaryGoal)).await;

    backend.saves_fail(true);
    send(&mut state, Msg::Next).await;

    assert_eq!(state.sequencer().current_step(), Some(Step::PrimaryGoal));
    assert_eq!(state.alert(), Some("There was a problem saving your goal."));
    Ok(())
}

/// A rejected goals save keeps the step and the optimistic selection
#[tokio::test]
async fn failed_goals_save_shows_alert_and_stays() -> Result<()> {
    let backend = MockBackend::new();
    backend.saves_fail(true);
    let mut state = start(backend.clone()).await;

    walk_to(&mut state, Some(Step::Goals)).await;
    send(&mut state, Msg::Select(0)).await;
    send(&mut state, Msg::Next).await;

    assert_eq!(state.sequencer().current_step(), Some(Step::Goals));
    assert_eq!(
        state.alert(),
        Some("There was a problem saving your selection. Please try again.")
    );
    assert!(state.sequencer().session().is_goal_selected(GOALS[0].key));
    assert!(!state.is_saving());

    send(&mut state, Msg::DismissAlert).await;
    assert!(state.alert().is_none());

    // Retry once the backend recovers
    backend.saves_fail(false);
    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::PrimaryGoal));
    Ok(())
}

/// Later steps log save failures without interrupting the user
#[tokio::test]
async fn failed_habit_save_stays_without_alert() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::EffectFrequency)).await;

    backend.saves_fail(true);
    send(&mut state, Msg::Next).await;

    assert_eq!(state.sequencer().current_step(), Some(Step::EffectFrequency));
    assert!(state.alert().is_none());
    assert!(state.save_failed());
    assert_eq!(state.sequencer().session().effect_frequency(), None);
    Ok(())
}

/// A save that completes after the user went back is not applied
#[tokio::test]
async fn stale_save_response_is_ignored() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::IdealOutcome)).await;

    let pending = Onboarding::update(&mut state, Msg::Next);
    assert!(state.is_saving());

    send(&mut state, Msg::Back).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::GoalOutcome));

    drive(&mut state, pending).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::GoalOutcome));
    assert_eq!(state.sequencer().session().ideal_outcome(), None);
    Ok(())
}

/// Re-entering a step starts a new visit, so the old visit's reply is dropped
#[tokio::test]
async fn reentered_step_ignores_previous_visit() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::IdealOutcome)).await;

    let pending = Onboarding::update(&mut state, Msg::Next);
    send(&mut state, Msg::Back).await;
    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::IdealOutcome));

    drive(&mut state, pending).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::IdealOutcome));
    Ok(())
}

/// A fetch started by an earlier step does not overwrite the next step's data
#[tokio::test]
async fn stale_fetch_response_is_ignored() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::GoalScience)).await;

    // Going back into FocusGoal starts a selections fetch we hold on to
    let pending = Onboarding::update(&mut state, Msg::Back);
    assert_eq!(state.sequencer().current_step(), Some(Step::FocusGoal));
    assert!(state.view().remote.is_loading());

    backend.fetches_fail(true);
    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::GoalScience));
    assert!(state.view().remote.is_failure());

    drive(&mut state, pending).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::GoalScience));
    assert!(state.view().remote.is_failure());
    Ok(())
}

/// Walking the whole questionnaire stores every answer and ends on the recap
#[tokio::test]
async fn full_walk_reaches_completion() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, None).await;

    assert!(state.sequencer().is_complete());
    let session = state.sequencer().session();
    assert_eq!(session.ideal_outcome(), Some(IdealOutcome::DrinkLess));
    assert_eq!(session.drinks_per_day().get(Weekday::Monday), 3);
    assert_eq!(session.drinks_per_day().total(), 3);
    assert_eq!(session.spend_per_drink(), 8.0);
    assert!(session.effect_frequency().is_some());
    assert!(session.alcohol_concern().is_some());

    let calls = backend.calls();
    for path in [
        paths::SAVE_DRINKS,
        paths::DRINKS_PER_DAY,
        paths::SAVE_SPEND,
        paths::WEEKLY_SPEND,
        paths::SAVE_ALCOHOL_FREQUENCY,
        paths::SAVE_ALCOHOL_CONCERN,
        paths::SAVE_IMPROVEMENT_AREAS,
        paths::TOTAL_DRINKS,
    ] {
        assert!(calls.iter().any(|c| c == path), "missing call to {}", path);
    }

    // Enter on the recap quits
    assert!(!send(&mut state, Msg::Next).await);
    Ok(())
}

/// Fetch failures fall back or report, and never block Next
#[tokio::test]
async fn fetch_failures_do_not_block_navigation() -> Result<()> {
    let backend = MockBackend::new();
    backend.fetches_fail(true);
    let mut state = start(backend.clone()).await;

    walk_to(&mut state, Some(Step::GoalScience)).await;
    assert!(state.view().remote.is_failure());
    assert!(state.can_advance());

    walk_to(&mut state, Some(Step::WeeklySpend)).await;
    assert!(state.view().remote.is_failure());

    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::EffectFrequency));
    Ok(())
}

/// Spend entry filters keystrokes and saves the typed amount
#[tokio::test]
async fn spend_entry_saves_typed_amount() -> Result<()> {
    let backend = MockBackend::new();
    let mut state = start(backend.clone()).await;
    walk_to(&mut state, Some(Step::SpendPerDrink)).await;
    assert_eq!(state.view().spend_input, "8");

    send(&mut state, Msg::Backspace).await;
    assert!(!state.can_advance());

    for key in ['1', '2', '.', '5', '0', '9', 'x'] {
        send(&mut state, Msg::Input(key)).await;
    }
    assert_eq!(state.view().spend_input, "12.50");

    send(&mut state, Msg::Next).await;
    assert_eq!(state.sequencer().current_step(), Some(Step::WeeklySpend));
    assert_eq!(state.sequencer().session().spend_per_drink(), 12.5);
    Ok(())
}
