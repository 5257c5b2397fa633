// Response schemas handed to the model for structured output
//
// Field names here must stay in step with the structs in `wire`.

use serde_json::{json, Value};

use crate::roadmap::Severity;

fn item_schema(annotation_field: &str, annotation: Value) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            annotation_field: annotation,
        },
        "required": ["id", "title", "description", annotation_field],
    })
}

/// Schema for the failure roadmap
pub fn roadmap_schema() -> Value {
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "business_concept": { "type": "STRING" },
            "doom_score": { "type": "INTEGER" },
            "phases": {
                "type": "OBJECT",
                "properties": {
                    "market_ignorance": {
                        "type": "ARRAY",
                        "items": item_schema(
                            "severity",
                            json!({ "type": "STRING", "format": "enum", "enum": severities }),
                        ),
                    },
                    "financial_suicide": {
                        "type": "ARRAY",
                        "items": item_schema("estimated_burn", json!({ "type": "STRING" })),
                    },
                    "operational_hell": {
                        "type": "ARRAY",
                        "items": item_schema("time_wasted", json!({ "type": "STRING" })),
                    },
                },
                "required": ["market_ignorance", "financial_suicide", "operational_hell"],
            },
            "the_obituary": {
                "type": "OBJECT",
                "properties": {
                    "headline": { "type": "STRING" },
                    "tweet_text": { "type": "STRING" },
                },
                "required": ["headline", "tweet_text"],
            },
        },
        "required": ["business_concept", "doom_score", "phases", "the_obituary"],
    })
}

/// Schema for the inversion list
pub fn inversion_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "bad_decision": { "type": "STRING" },
                "strategic_rule": { "type": "STRING" },
            },
            "required": ["bad_decision", "strategic_rule"],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadmap_schema_requires_annotations() {
        let schema = roadmap_schema();
        let phases = &schema["properties"]["phases"]["properties"];
        assert_eq!(
            phases["financial_suicide"]["items"]["required"][3],
            "estimated_burn"
        );
        assert_eq!(
            phases["operational_hell"]["items"]["required"][3],
            "time_wasted"
        );
        assert_eq!(
            phases["market_ignorance"]["items"]["properties"]["severity"]["enum"][2],
            "Company Killer"
        );
    }

    #[test]
    fn test_inversion_schema_is_array() {
        assert_eq!(inversion_schema()["type"], "ARRAY");
    }
}
