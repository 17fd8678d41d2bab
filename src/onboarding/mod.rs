//! The questionnaire core: step list, session answers and the sequencer
//! that moves between them. Nothing in here touches the terminal or the
//! network.

pub mod catalog;
pub mod input;
pub mod sequencer;
pub mod session;
pub mod step;
pub mod summary;

pub use sequencer::{Navigation, Payload, Route, StepSequencer, Transition};
pub use session::{DrinksPerDay, SessionState, Weekday};
pub use step::{Section, Step};
pub use summary::WeeklySummary;
