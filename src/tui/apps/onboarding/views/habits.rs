use std::collections::BTreeSet;

use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

use super::{check_mark, heading, hint, is_loading, spinner};
use crate::onboarding::catalog::{self, ConcernLevel, EffectFrequency, ImprovementArea};
use crate::onboarding::summary::{self, WeeklySummary};
use crate::onboarding::{DrinksPerDay, SessionState, Weekday};
use crate::tui::apps::onboarding::{HABIT_TICKS_PER_TOPIC, HABIT_TOPICS, Msg, RemoteData, ViewState};
use crate::tui::{Choice, ColumnBuilder, Element, LayoutConstraint, Resource, Theme};

pub(super) fn habits_intro(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let revealed = (view.ticks / HABIT_TICKS_PER_TOPIC) as usize;

    let mut spans = Vec::new();
    for topic in HABIT_TOPICS.iter().take(revealed) {
        spans.push(Span::styled(format!("◆ {}   ", topic), Style::default().fg(theme.teal)));
    }

    let footer = if revealed >= HABIT_TOPICS.len() {
        Element::paragraph(vec![Line::from(
            "Next we'll look at your drinking habits. Small changes to these add up quickly.",
        )])
    } else {
        Element::None
    };

    ColumnBuilder::new()
        .add(heading("Your Habits", theme), LayoutConstraint::Length(1))
        .add(Element::styled_text(Line::from(spans)), LayoutConstraint::Length(1))
        .add(footer, LayoutConstraint::Fill(1))
        .spacing(1)
        .build()
}

pub(super) fn habits_detail(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let (text, page_hint) = if view.page == 0 {
        (
            "This is a safe place. Everything you share here is judgment free.",
            "Page 1 of 2",
        )
    } else {
        (
            "Tell us about a typical week of drinking so we can build a plan that works for you.",
            "Page 2 of 2 · ← previous page",
        )
    };

    Element::column(vec![
        Element::paragraph(vec![Line::from(text)]),
        hint(page_hint, theme),
    ])
    .spacing(1)
    .build()
}

pub(super) fn drinks_per_day(drinks: &DrinksPerDay, day: usize, theme: &Theme) -> Element<Msg> {
    let current = Weekday::from_index(day).unwrap_or(Weekday::Monday);

    let mut week = Vec::new();
    for (weekday, count) in drinks.iter() {
        let style = if weekday == current {
            Style::default().fg(theme.base).bg(theme.lavender).bold()
        } else if weekday.index() < current.index() {
            Style::default().fg(theme.green)
        } else {
            Style::default().fg(theme.overlay1)
        };
        week.push(Span::styled(format!(" {} {:>3} ", weekday.initial(), count), style));
        week.push(Span::raw(" "));
    }

    let entry = Element::styled_text(Line::from(vec![
        Span::styled(format!("{}: ", current.name()), Style::default().fg(theme.text)),
        Span::styled(drinks.get(current).to_string(), Style::default().fg(theme.peach).bold()),
        Span::styled(" drinks", Style::default().fg(theme.subtext0)),
    ]));

    let next_hint = if current == Weekday::Sunday {
        "Enter saves your week."
    } else {
        "Enter moves to the next day."
    };

    Element::column(vec![
        heading("How many drinks do you have on a typical day?", theme),
        Element::styled_text(Line::from(week)),
        entry,
        hint(format!("Type a number, ↑/↓ to adjust. {}", next_hint), theme),
    ])
    .spacing(1)
    .build()
}

pub(super) fn weekly_summary(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let body = match &view.remote {
        Resource::Success(RemoteData::Drinks(drinks)) => {
            let summary = WeeklySummary::from_drinks(drinks);
            Element::column(vec![
                stat("Total Drinks This Week", summary.total_drinks.to_string(), theme),
                stat("Dry Days", summary.dry_days.to_string(), theme),
            ])
            .build()
        }
        Resource::Failure(e) => Element::styled(
            format!("Failed to load your drinks: {}", e),
            Style::default().fg(theme.red),
        ),
        _ => spinner(view, "Loading drinks data…", theme),
    };

    Element::column(vec![heading("Your week at a glance", theme), body])
        .spacing(1)
        .build()
}

pub(super) fn spend_per_drink(text: &str, current: f64, theme: &Theme) -> Element<Msg> {
    let entry = Element::styled_text(Line::from(vec![
        Span::styled("$ ", Style::default().fg(theme.subtext0)),
        Span::styled(text.to_string(), Style::default().fg(theme.peach).bold()),
        Span::styled("▏", Style::default().fg(theme.lavender)),
    ]));

    let footer = if text.is_empty() {
        hint(
            format!("Enter an amount to continue (last saved {}).", summary::format_currency(current)),
            theme,
        )
    } else {
        hint("Up to two decimal places.", theme)
    };

    Element::column(vec![
        heading("How much do you typically spend per drink?", theme),
        entry,
        footer,
    ])
    .spacing(1)
    .build()
}

pub(super) fn weekly_spend(view: &ViewState, theme: &Theme) -> Element<Msg> {
    let amount = match &view.remote {
        _ if is_loading(&view.remote) => return spinner(view, "Loading…", theme),
        Resource::Success(RemoteData::WeeklySpend(Some(total))) => summary::format_currency(*total),
        _ => "unavailable".to_string(),
    };

    Element::column(vec![
        heading("Weekly Alcohol Spend", theme),
        stat("You spend about", amount, theme),
        hint("Cutting back frees that money up for the things you care about.", theme),
    ])
    .spacing(1)
    .build()
}

pub(super) fn effect_frequency(chosen: Option<EffectFrequency>, cursor: usize) -> Element<Msg> {
    let items = EffectFrequency::ALL
        .iter()
        .map(|frequency| Choice::new(frequency.label()).checked(chosen == Some(*frequency)))
        .collect();

    Element::column(vec![
        Element::text("How often do you feel the negative effects of alcohol?"),
        Element::choices(items, cursor).on_select(Msg::Select).build(),
    ])
    .spacing(1)
    .build()
}

pub(super) fn alcohol_concern(chosen: Option<ConcernLevel>, cursor: usize) -> Element<Msg> {
    let items = ConcernLevel::ALL
        .iter()
        .map(|level| Choice::new(level.label()).checked(chosen == Some(*level)))
        .collect();

    Element::column(vec![
        Element::text("How often do you worry about how much you drink?"),
        Element::choices(items, cursor).on_select(Msg::Select).build(),
    ])
    .spacing(1)
    .build()
}

pub(super) fn improvement_areas(
    chosen: &BTreeSet<ImprovementArea>,
    cursor: usize,
    theme: &Theme,
) -> Element<Msg> {
    let items = ImprovementArea::ALL
        .iter()
        .map(|area| {
            Choice::new(area.title())
                .detail(area.description())
                .checked(chosen.contains(area))
        })
        .collect();

    Element::column(vec![
        heading("Which areas would you like to improve?", theme),
        hint("(Choose as many as you'd like)", theme),
        Element::choices(items, cursor).multi().on_select(Msg::Select).build(),
    ])
    .spacing(1)
    .build()
}

pub(super) fn weekly_reduction(view: &ViewState, theme: &Theme) -> Element<Msg> {
    // A failed fetch keeps showing the loading line
    let Resource::Success(RemoteData::TotalDrinks(total)) = &view.remote else {
        return spinner(view, "Loading…", theme);
    };

    let projected = summary::projected_weekly_drinks(*total);

    Element::column(vec![
        Element::paragraph(vec![Line::from(
            "HealthApp members reduce their weekly drinking by 32% in the first 30 days.†",
        )]),
        Element::text("Here's what this could look like for you:"),
        stat("Today", format!("{} drinks weekly", total.round()), theme),
        stat("After 30 days", format!("{} drinks weekly", projected), theme),
    ])
    .spacing(1)
    .build()
}

pub(super) fn habits_complete(view: &ViewState, theme: &Theme) -> Element<Msg> {
    Element::column(vec![
        check_mark(view, "You're on your way", theme),
        Element::paragraph(vec![Line::from(Span::styled(
            "\"With HealthApp, I was able to cut my alcohol consumption down by more than half.\"",
            Style::default().fg(theme.text).italic(),
        ))]),
        hint("Kim, HealthApp member for 2 years", theme),
    ])
    .spacing(1)
    .build()
}

/// Local recap once every step is done
pub(super) fn complete(session: &SessionState, theme: &Theme) -> Element<Msg> {
    let drinks = WeeklySummary::from_drinks(session.drinks_per_day());
    let spend = summary::weekly_spend(drinks.total_drinks, session.spend_per_drink());

    let mut rows = vec![
        Element::styled("✓ You're all set", Style::default().fg(theme.green).bold()),
        stat(
            "Primary goal",
            session
                .primary_goal()
                .map(|goal| catalog::goal_info(goal).map(|info| info.label).unwrap_or(goal))
                .unwrap_or("not chosen")
                .to_string(),
            theme,
        ),
        stat(
            "Ideal outcome",
            session.ideal_outcome().map(|o| o.title()).unwrap_or("not chosen").to_string(),
            theme,
        ),
        stat("Drinks per week", drinks.total_drinks.to_string(), theme),
        stat("Dry days", drinks.dry_days.to_string(), theme),
        stat("Weekly spend", summary::format_currency(spend), theme),
    ];
    rows.push(hint("Press Enter or q to exit.", theme));

    Element::column(rows).build()
}

fn stat(label: &str, value: String, theme: &Theme) -> Element<Msg> {
    Element::styled_text(Line::from(vec![
        Span::styled(format!("{:<24}", label), Style::default().fg(theme.subtext0)),
        Span::styled(value, Style::default().fg(theme.text).bold()),
    ]))
}
