use crate::oracle::{Oracle, OracleRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::agent_api::{ChatMessage, Role};
use shared::settings::OracleSettings;
use shared::GatewayError;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MAX_ERROR_BODY: usize = 800;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Resolve the API key: settings first, then `GEMINI_API_KEY`, then `API_KEY`.
pub fn resolve_api_key(settings: &OracleSettings) -> Option<String> {
    let configured = settings
        .auth
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);

    configured.or_else(|| {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    })
}

pub struct GeminiClient {
    http: Client,
    auth_token: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &OracleSettings) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            auth_token: resolve_api_key(settings),
            model: settings.model.clone(),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.auth_token.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn build_request(request: OracleRequest) -> GeminiRequest {
    let system_instruction = request.system_instruction.map(|text| GeminiContent {
        role: None,
        parts: vec![GeminiPart { text }],
    });

    // Gemini expects roles "user" | "model"; the transcript uses "assistant".
    // Consecutive turns of one role (an unanswered message) share one content.
    let mut contents: Vec<GeminiContent> = Vec::new();
    for ChatMessage { role, text } in request.contents {
        let role = match role {
            Role::User => "user",
            Role::Assistant => "model",
        };
        match contents.last_mut() {
            Some(last) if last.role.as_deref() == Some(role) => {
                last.parts.push(GeminiPart { text });
            }
            _ => contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts: vec![GeminiPart { text }],
            }),
        }
    }

    let generation_config = request.response_schema.map(|schema| GenerationConfig {
        response_mime_type: "application/json".to_string(),
        response_schema: schema,
    });

    GeminiRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

fn extract_text(body: GeminiResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() > MAX_ERROR_BODY {
        let cut: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: OracleRequest) -> Result<String, GatewayError> {
        let key = self
            .auth_token
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let req = build_request(request);
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "gemini request failed");
                GatewayError::Transport(e.to_string())
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, model = %self.model, "gemini returned an error status");
            return Err(GatewayError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let body: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "could not decode gemini response body");
                GatewayError::Transport(format!("invalid response body: {}", e))
            })?;
        Ok(extract_text(body))
    }
}
