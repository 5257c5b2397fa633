// Session - the interaction state machine and its driver

pub mod controller;
pub mod state;
pub mod transition;

pub use controller::Controller;
pub use state::{InteractionState, Screen};
pub use transition::{reduce, working_set, Action, Effect, Rejected, Transition};
