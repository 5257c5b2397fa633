// JSON shapes exchanged with the model, and their validation
//
// The model is asked for exactly these shapes via a response schema. A
// response that parses but breaks an invariant is rejected as a whole.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::GenerationFailure;
use crate::roadmap::{
    Annotation, FailureItem, InversionPair, Obituary, RoadmapResult, Severity,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRoadmap {
    pub business_concept: String,
    pub doom_score: i64,
    pub phases: WirePhases,
    pub the_obituary: WireObituary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePhases {
    pub market_ignorance: Vec<WireMarketItem>,
    pub financial_suicide: Vec<WireFinancialItem>,
    pub operational_hell: Vec<WireOperationalItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMarketItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFinancialItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub estimated_burn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireOperationalItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time_wasted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireObituary {
    pub headline: String,
    pub tweet_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireInversion {
    pub bad_decision: String,
    pub strategic_rule: String,
}

impl TryFrom<WireRoadmap> for RoadmapResult {
    type Error = GenerationFailure;

    fn try_from(wire: WireRoadmap) -> Result<Self, Self::Error> {
        let doom_score = u8::try_from(wire.doom_score)
            .ok()
            .filter(|score| *score <= 100)
            .ok_or_else(|| {
                GenerationFailure::Invalid(format!(
                    "doom_score {} is outside 0-100",
                    wire.doom_score
                ))
            })?;

        let market = wire
            .phases
            .market_ignorance
            .into_iter()
            .map(|item| {
                let severity = Severity::parse(&item.severity).ok_or_else(|| {
                    GenerationFailure::Invalid(format!(
                        "unknown severity '{}' on item '{}'",
                        item.severity, item.id
                    ))
                })?;
                Ok(FailureItem {
                    id: item.id,
                    title: item.title,
                    description: item.description,
                    annotation: Annotation::Severity(severity),
                })
            })
            .collect::<Result<Vec<_>, GenerationFailure>>()?;

        let financial = wire
            .phases
            .financial_suicide
            .into_iter()
            .map(|item| FailureItem {
                id: item.id,
                title: item.title,
                description: item.description,
                annotation: Annotation::Burn(item.estimated_burn),
            })
            .collect();

        let operational = wire
            .phases
            .operational_hell
            .into_iter()
            .map(|item| FailureItem {
                id: item.id,
                title: item.title,
                description: item.description,
                annotation: Annotation::TimeCost(item.time_wasted),
            })
            .collect();

        let roadmap = RoadmapResult {
            concept_summary: wire.business_concept,
            doom_score,
            market,
            financial,
            operational,
            obituary: Obituary {
                headline: wire.the_obituary.headline,
                short_form_summary: wire.the_obituary.tweet_text,
            },
        };

        let duplicate = {
            let mut seen = HashSet::new();
            roadmap
                .items()
                .find(|item| !seen.insert(item.id.as_str()))
                .map(|item| item.id.clone())
        };
        if let Some(id) = duplicate {
            return Err(GenerationFailure::Invalid(format!(
                "item id '{}' appears more than once",
                id
            )));
        }

        Ok(roadmap)
    }
}

impl From<WireInversion> for InversionPair {
    fn from(wire: WireInversion) -> Self {
        Self {
            bad_decision: wire.bad_decision,
            strategic_rule: wire.strategic_rule,
        }
    }
}

/// Parse the model's roadmap text
pub fn parse_roadmap(text: &str) -> Result<RoadmapResult, GenerationFailure> {
    let wire: WireRoadmap = serde_json::from_str(text)?;
    RoadmapResult::try_from(wire)
}

/// Parse the model's inversion text
pub fn parse_inversion(text: &str) -> Result<Vec<InversionPair>, GenerationFailure> {
    let wire: Vec<WireInversion> = serde_json::from_str(text)?;
    Ok(wire.into_iter().map(InversionPair::from).collect())
}
