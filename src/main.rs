// Premortem
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use premortem::cli::{run_simulation, Cli, CliCommand, Repl};
use premortem::config::load_config;
use premortem::logging;
use premortem::providers::GeminiProvider;
use premortem::session::Controller;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let config = load_config(&cli.overrides())?;
    let provider =
        GeminiProvider::from_settings(&config.gemini).context("Failed to create Gemini provider")?;
    tracing::debug!("Using Gemini model {}", provider.model());

    let mut controller = Controller::with_provider(Arc::new(provider));

    match cli.command {
        Some(CliCommand::Simulate(args)) => {
            let output = run_simulation(&mut controller, &args).await?;
            println!("{}", output);
        }
        Some(CliCommand::Repl) | None => {
            let mut repl = Repl::new(controller)?;
            repl.run().await?;
        }
    }

    Ok(())
}
