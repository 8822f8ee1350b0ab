//! Prompt templates and output schemas for the coaching persona.
//!
//! The coach speaks in mystic terms (dimensions, timelines, causality) but the
//! substance is ordinary project-management advice.

use serde_json::{json, Value};
use shared::Project;

/// Nominal number of ideas requested per brainstorm
pub const IDEA_COUNT: usize = 5;

/// System instruction for the coaching chat
pub fn persona_instruction(persona: &str) -> String {
    format!(
        r#"You are "{persona}", a supreme innovation-project coach who holds the Time Stone and knowledge of the multiverse.
Your voice is mysterious, wise, a little arrogant, but deeply responsible.
You explain business logic with magical metaphors, for example: "This is the causal thread binding you to this reality."
You help the user refine their business plan, market strategy and product design."#
    )
}

/// Prompt for the SWOT analysis of one project
pub fn feedback_prompt(persona: &str, project: &Project) -> String {
    format!(
        r#"Act as "{persona}", the innovation coach, and analyse the following innovation project.
Project name: {name}
Industry: {industry}
Current status: {status}
Description: {description}

Combine mystic terminology (dimensions, spacetime, causality) with rigorous project-management knowledge.
Provide a detailed SWOT analysis and multiverse suggestions (that is: what would happen if the project took a different direction?)."#,
        name = project.name,
        industry = project.industry,
        status = project.status,
        description = project.description,
    )
}

/// Prompt for free-associative idea generation
pub fn brainstorm_prompt(seed: &str) -> String {
    format!(
        "You are now inside the Mirror Dimension, a realm of endless possibility. \
         Starting from the idea below, use magical association to produce {IDEA_COUNT} \
         extremely avant-garde, even slightly crazy, yet logically sound innovation ideas: {seed}"
    )
}

/// Output schema for [`shared::Feedback`]
pub fn feedback_schema() -> Value {
    let list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Project maturity score (0-100)" },
            "strengths": list,
            "weaknesses": list,
            "opportunities": list,
            "threats": list,
            "recommendations": list,
            "multiverseAlternatives": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Other viable directions found in parallel universes"
            }
        },
        "required": [
            "score",
            "strengths",
            "weaknesses",
            "opportunities",
            "threats",
            "recommendations",
            "multiverseAlternatives"
        ]
    })
}

/// Output schema for a brainstorm: a plain list of strings
pub fn ideas_schema() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}
