// Fixed prompts for the two model calls

use crate::roadmap::{DecisionBrief, DoomLevel};

pub const ROADMAP_SYSTEM_INSTRUCTION: &str = "You are the 'Chaos Consultant.' Your job is to analyze business ideas and ruthlessly identify their failure points. Do not be polite. Do not offer encouragement. Use the principle of Inversion. Use a cynical, dry, and analytical tone.

Output categories:
1. Market Ignorance: Why the market will reject this.
2. Financial Suicide: Expensive early mistakes.
3. Operational Hell: Logistical/legal nightmares.

Give every failure point an id that is unique across all three categories.
Temperature should scale with doom level (0-10).";

pub const INVERSION_SYSTEM_INSTRUCTION: &str = "Apply the mental model of Inversion to these specific points. Transform them into strict, actionable 'Anti-Goals' or 'Guardrails' that will prevent these specific failures. Output format: A list of objects with 'bad_decision' and 'strategic_rule'.";

pub fn roadmap_prompt(idea: &str, doom_level: DoomLevel) -> String {
    format!(
        "Analyze this business idea and show how it will fail: \"{}\". Doom level: {}/10.",
        idea,
        doom_level.get()
    )
}

pub fn inversion_prompt(items: &[DecisionBrief]) -> String {
    let list = items
        .iter()
        .map(|item| format!("{}: {}", item.title, item.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Invert the following bad decisions into strategic anti-goals/guardrails:\n{}",
        list
    )
}
