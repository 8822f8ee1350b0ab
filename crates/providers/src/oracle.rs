//! The generative-model collaborator, seen as a plain request/response oracle.

use async_trait::async_trait;
use shared::agent_api::ChatMessage;
use shared::GatewayError;

/// One generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleRequest {
    pub system_instruction: Option<String>,
    /// Conversation turns, oldest first; the last one is the prompt
    pub contents: Vec<ChatMessage>,
    /// Declared output shape; when set the oracle must answer with JSON
    pub response_schema: Option<serde_json::Value>,
}

impl OracleRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![ChatMessage::user(text)],
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

#[async_trait]
pub trait Oracle: Send + Sync {
    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// Send one request and return the raw reply text
    async fn generate(&self, request: OracleRequest) -> Result<String, GatewayError>;
}
