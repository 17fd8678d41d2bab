pub mod config;
pub mod start;
pub mod steps;

pub use config::{ConfigCommands, config_command};
pub use start::start_command;
pub use steps::steps_command;
