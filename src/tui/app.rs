use crate::tui::{Command, Element, Subscription, Theme};
use ratatui::text::Line;

/// The main trait that all TUI apps must implement.
///
/// This follows the Elm architecture:
/// - State: data that represents the app's current state
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands
/// - view: pure function that renders the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + Send + 'static {
    /// Startup values handed to init (backend handle, settings)
    type Flags;

    /// The app's state type
    type State: Send;

    /// The app's message type
    type Msg: Clone + Send + 'static;

    /// Build the initial state and the first command
    fn init(flags: Self::Flags) -> (Self::State, Command<Self::Msg>);

    /// Update the state based on a message and return a command
    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// Render the current state to an element tree
    fn view(state: &Self::State, theme: &Theme) -> Element<Self::Msg>;

    /// Declare what inputs this app wants to receive
    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Return the app's title
    fn title() -> &'static str;

    /// Return optional status text (dynamic, styled based on state)
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
