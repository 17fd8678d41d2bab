use crossterm::event::KeyCode;
use std::time::Duration;

/// Inputs an app wants in its current state, re-read after every update
pub enum Subscription<Msg> {
    /// `description` becomes a footer hint; empty keeps the key unlisted
    Keyboard {
        key: KeyCode,
        msg: Msg,
        description: String,
    },

    Timer { interval: Duration, msg: Msg },
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(key: KeyCode, description: impl Into<String>, msg: Msg) -> Self {
        Subscription::Keyboard {
            key,
            msg,
            description: description.into(),
        }
    }

    pub fn timer(interval: Duration, msg: Msg) -> Self {
        Subscription::Timer { interval, msg }
    }
}
