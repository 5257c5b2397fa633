// Generative-model collaborators
//
// The session only knows these two traits. The Gemini implementation is the
// production one; tests plug in their own.

use async_trait::async_trait;
use thiserror::Error;

use crate::roadmap::{DecisionBrief, DoomLevel, InversionPair, RoadmapResult};

pub mod gemini;
pub mod prompts;
pub mod schema;
pub mod wire;

pub use gemini::GeminiProvider;

/// Any failure of a collaborator call
///
/// Callers treat every variant the same way; the variants exist for logs.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no text")]
    EmptyResponse,

    #[error("response was not valid JSON for the schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response failed validation: {0}")]
    Invalid(String),
}

/// Produces a failure roadmap for an idea
#[async_trait]
pub trait RoadmapGenerator: Send + Sync {
    /// `doom_level` is passed through untouched; implementations decide how
    /// it shapes generation
    async fn generate_roadmap(
        &self,
        idea: &str,
        doom_level: DoomLevel,
    ) -> Result<RoadmapResult, GenerationFailure>;
}

/// Turns failure points into guardrails
#[async_trait]
pub trait DecisionInverter: Send + Sync {
    /// `items` is never empty
    async fn invert_decisions(
        &self,
        items: &[DecisionBrief],
    ) -> Result<Vec<InversionPair>, GenerationFailure>;
}
