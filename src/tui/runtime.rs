use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::tui::{App, Command, Element, InteractionRegistry, LayoutConstraint, Renderer, RowBuilder, Subscription, Theme};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// The runtime manages app lifecycle, event routing, and command execution
pub struct Runtime<A: App> {
    /// Current app state
    state: A::State,

    theme: Theme,

    /// Interaction registry for mouse events, rebuilt on every render
    registry: InteractionRegistry<A::Msg>,

    /// Keyboard subscriptions
    key_subscriptions: HashMap<KeyCode, A::Msg>,

    /// Timer subscriptions: (interval, last_tick, msg)
    timers: Vec<(Duration, Instant, A::Msg)>,

    /// Completed async commands are delivered here
    async_tx: mpsc::UnboundedSender<A::Msg>,
    async_rx: mpsc::UnboundedReceiver<A::Msg>,
}

impl<A: App> Runtime<A> {
    /// Must be called from within a tokio runtime, since the init command
    /// may spawn tasks.
    pub fn new(flags: A::Flags, theme: Theme) -> Result<Self> {
        let (state, init_command) = A::init(flags);
        let (async_tx, async_rx) = mpsc::unbounded_channel();

        let mut runtime = Self {
            state,
            theme,
            registry: InteractionRegistry::new(),
            key_subscriptions: HashMap::new(),
            timers: Vec::new(),
            async_tx,
            async_rx,
        };

        runtime.update_subscriptions();
        runtime.execute_command(init_command)?;

        Ok(runtime)
    }

    /// Get keyboard bindings for the footer
    pub fn get_key_bindings(&self) -> Vec<(KeyCode, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .filter_map(|sub| match sub {
                Subscription::Keyboard { key, description, .. } if !description.is_empty() => {
                    Some((key, description))
                }
                _ => None,
            })
            .collect()
    }

    pub fn get_title(&self) -> &'static str {
        A::title()
    }

    pub fn get_status(&self) -> Option<Line<'static>> {
        A::status(&self.state, &self.theme)
    }

    /// Get a reference to the app's state
    pub fn get_state(&self) -> &A::State {
        &self.state
    }

    /// Feed a message straight into the app, as if a subscription produced it
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<bool> {
        let command = A::update(&mut self.state, msg);
        let keep_running = self.execute_command(command)?;
        self.update_subscriptions();
        Ok(keep_running)
    }

    /// Poll timer subscriptions and fire those that are ready
    pub fn poll_timers(&mut self) -> Result<bool> {
        let now = Instant::now();
        let mut messages = Vec::new();

        for (interval, last_tick, msg) in &mut self.timers {
            if now.duration_since(*last_tick) >= *interval {
                messages.push(msg.clone());
                *last_tick = now;
            }
        }

        for msg in messages {
            if !self.dispatch(msg)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Deliver every async result that has arrived since the last poll
    pub fn poll_async(&mut self) -> Result<bool> {
        while let Ok(msg) = self.async_rx.try_recv() {
            if !self.dispatch(msg)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Update subscriptions based on current state.
    /// Timers whose interval is unchanged keep their phase.
    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        let previous: Vec<(Duration, Instant)> = self.timers.iter().map(|(i, t, _)| (*i, *t)).collect();
        self.timers.clear();

        for sub in A::subscriptions(&self.state) {
            match sub {
                Subscription::Keyboard { key, msg, .. } => {
                    // First subscription for a key wins
                    self.key_subscriptions.entry(key).or_insert(msg);
                }
                Subscription::Timer { interval, msg } => {
                    let last_tick = previous
                        .iter()
                        .find(|(i, _)| *i == interval)
                        .map(|(_, t)| *t)
                        .unwrap_or_else(Instant::now);
                    self.timers.push((interval, last_tick, msg));
                }
            }
        }
    }

    /// Handle a keyboard event
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        if let Some(msg) = self.key_subscriptions.get(&key_event.code).cloned() {
            return self.dispatch(msg);
        }

        Ok(true)
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse_event: MouseEvent) -> Result<bool> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            if let Some(msg) = self.registry.find_click(mouse_event.column, mouse_event.row) {
                return self.dispatch(msg);
            }
        }
        Ok(true)
    }

    /// Render header, app view and key hints
    pub fn render(&mut self, frame: &mut Frame) {
        let full_area = frame.area();
        let header_area = Rect {
            height: HEADER_HEIGHT.min(full_area.height),
            ..full_area
        };
        let footer_area = Rect {
            y: full_area.y + full_area.height.saturating_sub(FOOTER_HEIGHT),
            height: FOOTER_HEIGHT.min(full_area.height),
            ..full_area
        };
        let app_area = Rect {
            y: full_area.y + HEADER_HEIGHT,
            height: full_area.height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT),
            ..full_area
        };

        self.render_header(frame, header_area);

        self.registry.clear();
        let view = A::view(&self.state, &self.theme);
        Renderer::render(frame, &self.theme, &mut self.registry, &view, app_area);

        self.render_footer(frame, footer_area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = vec![Span::styled(A::title(), Style::default().fg(theme.blue).bold())];
        if let Some(status_line) = self.get_status() {
            spans.push(Span::raw("  "));
            spans.extend(status_line.spans);
        }

        let header: Element<()> = Element::panel(
            RowBuilder::new()
                .add(Element::styled_text(Line::from(spans)), LayoutConstraint::Fill(1))
                .add(
                    Element::styled_text(Line::from(Span::styled(
                        "Ctrl+Q Quit",
                        Style::default().fg(theme.overlay1),
                    ))),
                    LayoutConstraint::Length(11),
                )
                .spacing(0)
                .build(),
        )
        .build();

        let mut registry = InteractionRegistry::new();
        Renderer::render(frame, theme, &mut registry, &header, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = Vec::new();
        for (key, description) in self.get_key_bindings() {
            spans.push(Span::styled(format!("[{}]", key_label(key)), Style::default().fg(theme.peach)));
            spans.push(Span::styled(format!(" {}  ", description), Style::default().fg(theme.subtext0)));
        }

        let footer: Element<()> = Element::styled_text(Line::from(spans));
        let mut registry = InteractionRegistry::new();
        Renderer::render(frame, theme, &mut registry, &footer, area);
    }

    /// Execute a command. Returns false when the app asked to quit.
    fn execute_command(&mut self, command: Command<A::Msg>) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::Batch(commands) => {
                for cmd in commands {
                    if !self.execute_command(cmd)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Command::Quit => Ok(false),

            Command::Perform(future) => {
                let tx = self.async_tx.clone();
                tokio::spawn(async move {
                    let msg = future.await;
                    if tx.send(msg).is_err() {
                        log::debug!("Runtime dropped before async command completed");
                    }
                });
                Ok(true)
            }
        }
    }
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other),
    }
}
