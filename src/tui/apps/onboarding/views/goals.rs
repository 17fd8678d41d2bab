use std::collections::BTreeSet;

use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use super::{check_mark, heading, hint, is_loading, spinner};
use crate::onboarding::catalog::{self, GOALS, IdealOutcome, Relation};
use crate::onboarding::{Section, SessionState};
use crate::tui::apps::onboarding::{INTRO_TICKS_PER_SECTION, Msg, RemoteData, ViewState, primary_options};
use crate::tui::{Choice, ColumnBuilder, Element, LayoutConstraint, Resource, Theme};

const FALLBACK_FOCUS: &str = "your goal";
const FALLBACK_OUTCOME: &str = "Resulting in a healthier relationship with alcohol.";

/// Primary goal from a user-selections fetch, if it succeeded
fn fetched_primary(view: &ViewState) -> Option<&str> {
    match &view.remote {
        Resource::Success(RemoteData::Selections(selections)) => selections.primary_goal.as_deref(),
        _ => None,
    }
}

pub(super) fn intro(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let revealed = (view.ticks / INTRO_TICKS_PER_SECTION) as usize;

    let mut column = ColumnBuilder::new()
        .add(heading("Welcome! Here's how we'll build your plan:", theme), LayoutConstraint::Length(1))
        .add(Element::None, LayoutConstraint::Length(1));

    for (idx, section) in Section::ALL.iter().enumerate() {
        let line = if idx < revealed {
            Element::styled_text(Line::from(vec![
                Span::styled(format!("  {}. ", idx + 1), Style::default().fg(theme.overlay1)),
                Span::styled(section.label(), Style::default().fg(theme.text)),
            ]))
        } else {
            Element::None
        };
        column = column.add(line, LayoutConstraint::Length(1));
    }

    let footer = if revealed >= Section::ALL.len() {
        hint("First up: Your Goals. Press Enter to begin.", theme)
    } else {
        Element::None
    };

    column
        .add(Element::None, LayoutConstraint::Length(1))
        .add(footer, LayoutConstraint::Length(1))
        .add(Element::None, LayoutConstraint::Fill(1))
        .build()
}

pub(super) fn goals(selected: &BTreeSet<String>, cursor: usize, theme: &Theme) -> Element<Msg> {
    let items = GOALS
        .iter()
        .map(|goal| Choice::new(goal.label).checked(selected.contains(goal.key)))
        .collect();

    let footer = if selected.is_empty() {
        hint("Select at least one goal to continue.", theme)
    } else {
        hint(format!("{} selected", selected.len()), theme)
    };

    let list = Element::choices(items, cursor).multi().on_select(Msg::Select).build();
    let list_height = list.default_constraint();

    ColumnBuilder::new()
        .add(heading("Why do you want to change your drinking?", theme), LayoutConstraint::Length(1))
        .add(hint("Choose all that apply:", theme), LayoutConstraint::Length(1))
        .add(list, list_height)
        .add(footer, LayoutConstraint::Length(1))
        .spacing(1)
        .build()
}

pub(super) fn primary_goal(
    session: &SessionState,
    primary: Option<&str>,
    cursor: usize,
    theme: &Theme,
) -> Element<Msg> {
    let options = primary_options(session);
    if options.is_empty() {
        return hint("Go back and pick at least one goal first.", theme);
    }

    let items = options
        .iter()
        .map(|goal| Choice::new(goal.label).checked(primary == Some(goal.key)))
        .collect();

    Element::column(vec![
        heading("Which of these matters most to you?", theme),
        hint("Choose one:", theme),
        Element::choices(items, cursor).on_select(Msg::Select).build(),
    ])
    .spacing(1)
    .build()
}

pub(super) fn focus_goal(view: &ViewState, theme: &Theme) -> Element<Msg> {
    if is_loading(&view.remote) {
        return spinner(view, "Loading your goal…", theme);
    }

    let info = fetched_primary(view).and_then(catalog::goal_info);
    let focus = info.map(|info| info.focus_area).unwrap_or(FALLBACK_FOCUS);
    let relation = info.map(|info| info.relation).unwrap_or(Relation::Direct);

    // Bars for alcohol always fall; the goal metric follows or mirrors them
    let falling = ["█", "▇", "▆", "▅", "▃"];
    let rising = ["▃", "▅", "▆", "▇", "█"];
    let (verb, metric_bars) = match relation {
        Relation::Direct => ("goes down", falling),
        Relation::Inverse => ("goes up", rising),
    };

    let chart_row = |label: &str, bars: [&'static str; 5], color: ratatui::style::Color| {
        Element::styled_text(Line::from(vec![
            Span::styled(format!("{:<22}", label), Style::default().fg(theme.subtext0)),
            Span::styled(bars.join(" "), Style::default().fg(color)),
        ]))
    };

    Element::column(vec![
        heading(format!("Focus: {}", focus), theme),
        Element::paragraph(vec![Line::from(format!(
            "As your drinking goes down, {} {}.",
            focus.to_lowercase(),
            verb
        ))]),
        chart_row("Alcohol", falling, theme.peach),
        chart_row(focus, metric_bars, theme.teal),
    ])
    .spacing(1)
    .build()
}

pub(super) fn goal_science(view: &ViewState, theme: &Theme) -> Element<Msg> {
    if is_loading(&view.remote) {
        return spinner(view, "Loading the research…", theme);
    }

    let topic = catalog::science_topic(fetched_primary(view));

    Element::column(vec![
        heading(format!("The science: {}", topic), theme),
        Element::paragraph(vec![Line::from(catalog::science_summary(topic))]),
    ])
    .spacing(1)
    .build()
}

pub(super) fn goal_outcome(view: &ViewState, theme: &Theme) -> Element<Msg> {
    if is_loading(&view.remote) {
        return spinner(view, "Loading your goal…", theme);
    }

    let primary = fetched_primary(view);
    let info = primary.and_then(catalog::goal_info);
    let message = info.map(|info| info.outcome_message).unwrap_or(FALLBACK_OUTCOME);

    let lead = match (info, primary) {
        (Some(info), _) => format!("With mindful drinking you'll be working towards: {}", info.label),
        (None, Some(goal)) => format!("With mindful drinking you'll be working towards: {}", goal),
        (None, None) => "With mindful drinking you'll be working towards your goals.".to_string(),
    };

    Element::column(vec![
        Element::paragraph(vec![Line::from(lead)]),
        Element::styled(message, Style::default().fg(theme.green)),
    ])
    .spacing(1)
    .build()
}

pub(super) fn ideal_outcome(chosen: Option<IdealOutcome>, cursor: usize) -> Element<Msg> {
    let items = IdealOutcome::ALL
        .iter()
        .map(|outcome| {
            Choice::new(outcome.title())
                .detail(outcome.description())
                .checked(chosen == Some(*outcome))
        })
        .collect();

    Element::column(vec![
        Element::text("What is your ideal outcome?"),
        Element::choices(items, cursor).on_select(Msg::Select).build(),
    ])
    .spacing(1)
    .build()
}

pub(super) fn plan_set(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let message = match &view.remote {
        Resource::Success(RemoteData::IdealOutcome(Some(outcome))) => {
            Element::paragraph(vec![Line::from(outcome.plan_prompt())])
        }
        Resource::Success(_) => hint("No ideal outcome selected.", theme),
        Resource::Failure(e) => Element::styled(
            format!("Could not load your plan: {}", e),
            Style::default().fg(theme.red),
        ),
        Resource::Loading | Resource::NotAsked => spinner(view, "Loading…", theme),
    };

    Element::column(vec![heading("Your plan", theme), message])
        .spacing(1)
        .build()
}

pub(super) fn goals_complete(view: &ViewState, theme: &Theme) -> Element<Msg> {
    Element::column(vec![
        check_mark(view, "Your goals are set", theme),
        hint("You're joining more than 300,000 people changing their relationship with alcohol.", theme),
        Element::styled_text(Line::from(vec![
            Span::styled("★★★★★ ", Style::default().fg(theme.yellow)),
            Span::styled(
                "\"I feel a whole lot better and my family relationships have dramatically improved.\"",
                Style::default().fg(theme.text).italic(),
            ),
        ])),
    ])
    .spacing(1)
    .build()
}
