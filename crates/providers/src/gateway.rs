//! Translates coaching intents into oracle requests and parses the replies.
//!
//! Every operation is one-shot: no retries, no caching, no local timeout.
//! Failures of any kind come back as a typed [`GatewayError`].

use crate::oracle::{Oracle, OracleRequest};
use crate::prompts;
use serde::de::DeserializeOwned;
use shared::agent_api::ChatMessage;
use shared::settings::DEFAULT_PERSONA;
use shared::{Feedback, GatewayError, Project};
use std::sync::Arc;

/// Shown when the oracle answers a chat turn with no text
pub const EMPTY_REPLY_PLACEHOLDER: &str = "I cannot sense a response from this dimension...";

#[derive(Clone)]
pub struct AiGateway {
    oracle: Arc<dyn Oracle>,
    persona: String,
}

impl AiGateway {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            oracle,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn model(&self) -> &str {
        self.oracle.model()
    }

    /// SWOT-style analysis of a project
    pub async fn get_feedback(&self, project: &Project) -> Result<Feedback, GatewayError> {
        let request = OracleRequest::prompt(prompts::feedback_prompt(&self.persona, project))
            .with_schema(prompts::feedback_schema());
        let raw = self.oracle.generate(request).await?;

        let feedback: Feedback = parse_json(&raw)?;
        if !feedback.score_in_range() {
            return Err(GatewayError::Parse(format!(
                "score {} is outside 0-100",
                feedback.score
            )));
        }
        Ok(feedback)
    }

    /// Free-associative ideas seeded from `seed`
    pub async fn generate_ideas(&self, seed: &str) -> Result<Vec<String>, GatewayError> {
        let request = OracleRequest::prompt(prompts::brainstorm_prompt(seed))
            .with_schema(prompts::ideas_schema());
        let raw = self.oracle.generate(request).await?;

        let ideas: Vec<String> = parse_json(&raw)?;
        Ok(ideas
            .into_iter()
            .map(|idea| idea.trim().to_string())
            .filter(|idea| !idea.is_empty())
            .collect())
    }

    /// One coaching turn. The whole prior transcript is replayed to the
    /// oracle, followed by `new_message`.
    pub async fn send_chat(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<String, GatewayError> {
        let mut contents = history.to_vec();
        contents.push(ChatMessage::user(new_message));

        let request = OracleRequest {
            contents,
            ..OracleRequest::default()
        }
        .with_system_instruction(prompts::persona_instruction(&self.persona));
        let reply = self.oracle.generate(request).await?;

        if reply.trim().is_empty() {
            Ok(EMPTY_REPLY_PLACEHOLDER.to_string())
        } else {
            Ok(reply)
        }
    }
}

/// Parse structured output, tolerating a Markdown code fence around it.
fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, GatewayError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(GatewayError::Parse("empty response".into()));
    }
    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "oracle reply did not match the expected shape");
        GatewayError::Parse(e.to_string())
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().trim_end_matches("```").trim()
}
