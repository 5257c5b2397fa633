// Non-interactive run: one idea in, one screen (or JSON report) out

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::args::SimulateArgs;
use super::render::render;
use crate::roadmap::{InversionPair, RoadmapResult};
use crate::session::{Controller, InteractionState, Screen};

/// What `simulate --json` prints
#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    pub idea: &'a str,
    pub doom_level: u8,
    pub doom_label: &'static str,
    pub screen: Screen,
    pub roadmap: Option<&'a RoadmapResult>,
    pub selected: Vec<&'a str>,
    pub inversion: Option<&'a [InversionPair]>,
}

impl<'a> SimulationReport<'a> {
    pub fn from_state(state: &'a InteractionState) -> Self {
        Self {
            idea: &state.idea,
            doom_level: state.doom_level.get(),
            doom_label: state.doom_level.label(),
            screen: state.screen,
            roadmap: state.roadmap.as_ref(),
            selected: state.selected.iter().map(String::as_str).collect(),
            inversion: state.inversion.as_deref(),
        }
    }
}

/// Drive the controller through the steps the arguments ask for
pub async fn run_simulation(controller: &mut Controller, args: &SimulateArgs) -> Result<String> {
    let state = controller.submit_idea(&args.idea, args.doom).await?;
    if let Some(error) = &state.error {
        bail!("{}", error);
    }

    for id in &args.select {
        match controller
            .state()
            .roadmap
            .as_ref()
            .and_then(|roadmap| roadmap.find_item(id))
        {
            Some(item) => tracing::debug!("Selecting {} ({})", item.id, item.title),
            None => {
                tracing::warn!("Ignoring unknown failure point '{}'", id);
                continue;
            }
        }
        controller.toggle_selection(id).await?;
    }

    if args.autopsy {
        controller.view_autopsy().await?;
    } else if args.invert {
        let state = controller.invert_selections().await?;
        if let Some(error) = &state.error {
            bail!("{}", error);
        }
    }

    let state = controller.state();
    if args.json {
        serde_json::to_string_pretty(&SimulationReport::from_state(state))
            .context("Failed to serialize simulation report")
    } else {
        Ok(render(state))
    }
}
