pub mod commands;
pub mod controller;
pub mod state;

pub use controller::BreakTicker;
pub use state::{TimerEvent, TimerState, TimerStatus};
