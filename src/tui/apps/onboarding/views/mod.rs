use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use super::{Msg, State, ViewState};
use crate::onboarding::{Route, Section, Step};
use crate::tui::{ColumnBuilder, Element, LayoutConstraint, Resource, RowBuilder, Theme};

mod goals;
mod habits;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(super) fn render(state: &State, theme: &Theme) -> Element<Msg> {
    let view = &state.view;

    let body = match state.sequencer.route() {
        Route::Intro => goals::intro(view, theme),
        Route::Goals { selected } => goals::goals(selected, view.cursor, theme),
        Route::PrimaryGoal { primary, .. } => {
            goals::primary_goal(state.sequencer.session(), primary, view.cursor, theme)
        }
        Route::FocusGoal => goals::focus_goal(view, theme),
        Route::GoalScience => goals::goal_science(view, theme),
        Route::GoalOutcome => goals::goal_outcome(view, theme),
        Route::IdealOutcome { chosen } => goals::ideal_outcome(chosen, view.cursor),
        Route::PlanSet => goals::plan_set(view, theme),
        Route::GoalsComplete => goals::goals_complete(view, theme),
        Route::HabitsIntro => habits::habits_intro(view, theme),
        Route::HabitsDetail => habits::habits_detail(view, theme),
        Route::DrinksPerDay { drinks } => habits::drinks_per_day(drinks, view.day, theme),
        Route::WeeklySummary => habits::weekly_summary(view, theme),
        Route::SpendPerDrink { spend } => habits::spend_per_drink(&view.spend_input, spend, theme),
        Route::WeeklySpend => habits::weekly_spend(view, theme),
        Route::EffectFrequency { chosen } => habits::effect_frequency(chosen, view.cursor),
        Route::AlcoholConcern { chosen } => habits::alcohol_concern(chosen, view.cursor),
        Route::ImprovementAreas { .. } => habits::improvement_areas(&view.areas, view.cursor, theme),
        Route::WeeklyReduction => habits::weekly_reduction(view, theme),
        Route::HabitsComplete => habits::habits_complete(view, theme),
        Route::Complete { session } => habits::complete(session, theme),
    };

    let title = state
        .sequencer
        .current_step()
        .map(Step::title)
        .unwrap_or("All done");

    let page = ColumnBuilder::new()
        .add(Element::styled_text(progress(state.sequencer.current_step(), theme)), LayoutConstraint::Length(1))
        .add(body, LayoutConstraint::Fill(1))
        .add(nav_bar(state, theme), LayoutConstraint::Length(1))
        .spacing(1)
        .build();

    let page = Element::panel(Element::container(page).padding(1).build())
        .title(title)
        .build();

    match state.alert() {
        Some(message) => Element::alert(page, "Something went wrong", message),
        None => page,
    }
}

/// Section strip shared by every step
fn progress(step: Option<Step>, theme: &Theme) -> Line<'static> {
    let current = step.map(Step::section);
    let position = |section: Section| Section::ALL.iter().position(|s| *s == section);
    // Completion counts as finishing both questionnaire sections
    let current_pos = match current {
        Some(section) => position(section).unwrap_or(0),
        None => position(Section::Habits).map(|p| p + 1).unwrap_or(0),
    };

    let mut spans = Vec::new();
    for (idx, section) in Section::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(theme.surface1)));
        }
        let span = if idx < current_pos {
            Span::styled(format!("✓ {}", section.label()), Style::default().fg(theme.green))
        } else if idx == current_pos {
            Span::styled(format!("● {}", section.label()), Style::default().fg(theme.lavender).bold())
        } else {
            Span::styled(format!("○ {}", section.label()), Style::default().fg(theme.overlay1))
        };
        spans.push(span);
    }
    Line::from(spans)
}

fn nav_bar(state: &State, theme: &Theme) -> Element<Msg> {
    let back = if state.sequencer.current_index() > 0 {
        Element::button("← Back").on_press(Msg::Back).build()
    } else {
        Element::None
    };

    let next_label = if state.sequencer.is_complete() { "Exit" } else { "Next →" };
    let next = if state.is_saving() {
        Element::styled("Saving…", Style::default().fg(theme.yellow))
    } else if state.can_advance() {
        Element::button(next_label).on_press(Msg::Next).build()
    } else {
        Element::button(next_label)
            .style(Style::default().fg(theme.surface1))
            .build()
    };

    RowBuilder::new()
        .add(back, LayoutConstraint::Length(10))
        .add(Element::None, LayoutConstraint::Fill(1))
        .add(next, LayoutConstraint::Length(10))
        .build()
}

fn heading(text: impl Into<String>, theme: &Theme) -> Element<Msg> {
    Element::styled(text, Style::default().fg(theme.blue).bold())
}

fn hint(text: impl Into<String>, theme: &Theme) -> Element<Msg> {
    Element::styled(text, Style::default().fg(theme.subtext0))
}

fn spinner(view: &ViewState, label: &str, theme: &Theme) -> Element<Msg> {
    let frame = SPINNER_FRAMES[view.ticks as usize % SPINNER_FRAMES.len()];
    Element::styled_text(Line::from(vec![
        Span::styled(frame, Style::default().fg(theme.sky).bold()),
        Span::styled(format!(" {}", label), Style::default().fg(theme.subtext0)),
    ]))
}

/// Check mark shown once a completion page's delay has elapsed
fn check_mark(view: &ViewState, done_label: &str, theme: &Theme) -> Element<Msg> {
    if view.ticks >= super::CHECK_DELAY_TICKS {
        Element::styled(format!("✓ {}", done_label), Style::default().fg(theme.green).bold())
    } else {
        spinner(view, "Saving your answers…", theme)
    }
}

fn is_loading<T>(remote: &Resource<T>) -> bool {
    remote.is_loading() || matches!(remote, Resource::NotAsked)
}
