// Interaction state - the single record a session mutates

use im::OrdSet;
use serde::Serialize;
use std::fmt;

use crate::roadmap::{DoomLevel, InversionPair, RoadmapResult};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    /// Waiting on roadmap generation
    Simulating,
    Roadmap,
    Autopsy,
    /// Waiting on decision inversion
    Inverting,
    Inversion,
}

impl Screen {
    /// Transient screens are only left when the outstanding remote call resolves
    pub fn is_transient(self) -> bool {
        matches!(self, Screen::Simulating | Screen::Inverting)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Landing => "landing",
            Screen::Simulating => "simulating",
            Screen::Roadmap => "roadmap",
            Screen::Autopsy => "autopsy",
            Screen::Inverting => "inverting",
            Screen::Inversion => "inversion",
        };
        f.write_str(name)
    }
}

/// Everything a session knows
///
/// Values are replaced wholesale on each transition; `selected` is a
/// persistent set so copies share structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub screen: Screen,
    pub idea: String,
    pub doom_level: DoomLevel,
    pub roadmap: Option<RoadmapResult>,
    /// Always a subset of the ids in `roadmap`
    pub selected: OrdSet<String>,
    pub inversion: Option<Vec<InversionPair>>,
    /// Set on the first successful inversion and never cleared except by restart
    pub inverted: bool,
    /// Transient user-visible error, cleared by dismissal
    pub error: Option<String>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.screen.is_transient()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }
}
