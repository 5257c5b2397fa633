// Command-line interface definition

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::constants::DEFAULT_DOOM_LEVEL;
use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(
    name = "premortem",
    version,
    about = "Pre-mortem engine: map how a business idea fails, then invert the failures into guardrails"
)]
pub struct Cli {
    /// Config file (default: ~/.premortem/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Gemini API key (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Repl,
    /// Run one simulation without prompting
    Simulate(SimulateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// The business idea to doom
    #[arg(long)]
    pub idea: String,

    /// Doom level, 1-10
    #[arg(long, default_value_t = DEFAULT_DOOM_LEVEL as i64)]
    pub doom: i64,

    /// Failure point ids to select before inverting (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Invert the selected (or first three) failure points
    #[arg(long)]
    pub invert: bool,

    /// Show the obituary instead of the roadmap
    #[arg(long, conflicts_with = "invert")]
    pub autopsy: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}
