// Terminal front-end: argument parsing, REPL, one-shot runs and rendering

pub mod args;
pub mod commands;
pub mod render;
pub mod repl;
pub mod simulate;

pub use args::{Cli, Command as CliCommand, SimulateArgs};
pub use repl::Repl;
pub use simulate::{run_simulation, SimulationReport};
