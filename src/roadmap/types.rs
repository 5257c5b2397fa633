// Failure roadmap data model
//
// These are the validated, provider-agnostic shapes the session works with.
// Provider wire formats convert into them (see providers::wire).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three failure categories, in display and working-set order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MarketRisk,
    FinancialRisk,
    OperationalRisk,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::MarketRisk,
        Category::FinancialRisk,
        Category::OperationalRisk,
    ];

    /// Column heading on the roadmap screen
    pub fn heading(self) -> &'static str {
        match self {
            Category::MarketRisk => "MARKET VOID",
            Category::FinancialRisk => "CASH BONFIRE",
            Category::OperationalRisk => "OPERATIONAL HELL",
        }
    }

    /// Short tag printed on each card
    pub fn tag(self) -> &'static str {
        match self {
            Category::MarketRisk => "MARKET",
            Category::FinancialRisk => "BURN",
            Category::OperationalRisk => "VOID",
        }
    }
}

/// How badly a market risk hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Killer,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Minor, Severity::Major, Severity::Killer];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minor => "Minor Setback",
            Severity::Major => "Major Pivot Required",
            Severity::Killer => "Company Killer",
        }
    }

    /// Parse the long form, accepting the short variant name as well
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|severity| {
            severity.as_str().eq_ignore_ascii_case(value)
                || format!("{:?}", severity).eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category-specific annotation carried by every item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Annotation {
    Severity(Severity),
    Burn(String),
    TimeCost(String),
}

impl Annotation {
    pub fn category(&self) -> Category {
        match self {
            Annotation::Severity(_) => Category::MarketRisk,
            Annotation::Burn(_) => Category::FinancialRisk,
            Annotation::TimeCost(_) => Category::OperationalRisk,
        }
    }
}

/// A single failure point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub annotation: Annotation,
}

impl FailureItem {
    pub fn category(&self) -> Category {
        self.annotation.category()
    }

    pub fn brief(&self) -> DecisionBrief {
        DecisionBrief {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Headline and short-form recap shown on the autopsy screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obituary {
    pub headline: String,
    pub short_form_summary: String,
}

/// Result of the first remote call
///
/// Items within a roadmap have unique ids and each category vector only
/// holds items whose annotation matches the category. Both are checked when
/// converting from a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResult {
    pub concept_summary: String,
    pub doom_score: u8,
    pub market: Vec<FailureItem>,
    pub financial: Vec<FailureItem>,
    pub operational: Vec<FailureItem>,
    pub obituary: Obituary,
}

impl RoadmapResult {
    pub fn items_in(&self, category: Category) -> &[FailureItem] {
        match category {
            Category::MarketRisk => &self.market,
            Category::FinancialRisk => &self.financial,
            Category::OperationalRisk => &self.operational,
        }
    }

    /// All items in category order, each category keeping its own order
    pub fn items(&self) -> impl Iterator<Item = &FailureItem> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.items_in(category).iter())
    }

    pub fn item_count(&self) -> usize {
        self.market.len() + self.financial.len() + self.operational.len()
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.items().any(|item| item.id == id)
    }

    pub fn find_item(&self, id: &str) -> Option<&FailureItem> {
        self.items().find(|item| item.id == id)
    }
}

/// The `{title, description}` pair sent to the inverter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionBrief {
    pub title: String,
    pub description: String,
}

/// A bad decision turned into a guardrail
///
/// The inverter does not promise to return pairs in working-set order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InversionPair {
    pub bad_decision: String,
    pub strategic_rule: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, annotation: Annotation) -> FailureItem {
        FailureItem {
            id: id.to_string(),
            title: format!("{} title", id),
            description: format!("{} description", id),
            annotation,
        }
    }

    fn sample() -> RoadmapResult {
        RoadmapResult {
            concept_summary: "Ice cubes, but monthly".to_string(),
            doom_score: 91,
            market: vec![item("m1", Annotation::Severity(Severity::Killer))],
            financial: vec![
                item("f1", Annotation::Burn("$2M".to_string())),
                item("f2", Annotation::Burn("$40k".to_string())),
            ],
            operational: vec![item("o1", Annotation::TimeCost("18 months".to_string()))],
            obituary: Obituary {
                headline: "Melted".to_string(),
                short_form_summary: "It melted.".to_string(),
            },
        }
    }

    #[test]
    fn test_items_follow_category_order() {
        let roadmap = sample();
        let ids: Vec<&str> = roadmap.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "f1", "f2", "o1"]);
        assert_eq!(roadmap.item_count(), 4);
    }

    #[test]
    fn test_lookup() {
        let roadmap = sample();
        assert!(roadmap.contains_item("f2"));
        assert!(!roadmap.contains_item("x9"));
        assert_eq!(
            roadmap.find_item("o1").map(|i| i.category()),
            Some(Category::OperationalRisk)
        );
    }

    #[test]
    fn test_severity_parse_accepts_both_forms() {
        assert_eq!(Severity::parse("Company Killer"), Some(Severity::Killer));
        assert_eq!(Severity::parse("major pivot required"), Some(Severity::Major));
        assert_eq!(Severity::parse("Minor"), Some(Severity::Minor));
        assert_eq!(Severity::parse("catastrophic"), None);
    }
}
