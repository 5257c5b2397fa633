// Roadmap domain types
//
// The idea being doomed, the failure roadmap returned for it, and the
// guardrails produced by inverting selected failures.

mod doom;
mod types;

pub use doom::DoomLevel;
pub use types::{
    Annotation, Category, DecisionBrief, FailureItem, InversionPair, Obituary, RoadmapResult,
    Severity,
};
