//! In-memory oracle for tests in this and downstream crates.

use crate::oracle::{Oracle, OracleRequest};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::GatewayError;
use std::collections::VecDeque;
use std::sync::Arc;

/// Replays canned replies in order and records every request
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub fn new(replies: Vec<Result<String, GatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<OracleRequest> {
        self.requests.lock().last().cloned()
    }

    /// Text of the final turn of the last request
    pub fn last_prompt(&self) -> Option<String> {
        self.last_request()
            .and_then(|r| r.contents.last().map(|m| m.text.clone()))
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: OracleRequest) -> Result<String, GatewayError> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted reply".into())))
    }
}
