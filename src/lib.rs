// Premortem - satirical failure roadmaps and their inversion into guardrails
// Library exports

pub mod cli;
pub mod config;
pub mod logging;
pub mod providers;
pub mod roadmap;
pub mod session;
