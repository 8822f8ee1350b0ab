//! Core types for the InnoAgent app
//!
//! Operation kinds, background results and the surfaced failure state shared
//! by the session controller and the views.

use chrono::{DateTime, Utc};
use shared::{Feedback, GatewayError};
use uuid::Uuid;

/// An oracle-backed operation. At most one of each kind is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Feedback,
    Brainstorm,
    Chat,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Feedback => "feedback",
            Operation::Brainstorm => "brainstorm",
            Operation::Chat => "chat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Feedback => "Project analysis",
            Operation::Brainstorm => "Mirror Dimension",
            Operation::Chat => "Coach",
        }
    }
}

/// Result from a background oracle request
#[derive(Debug)]
pub enum Completion {
    Feedback {
        project_id: Uuid,
        result: Result<Feedback, GatewayError>,
    },
    Brainstorm(Result<Vec<String>, GatewayError>),
    Chat(Result<String, GatewayError>),
}

impl Completion {
    pub fn operation(&self) -> Operation {
        match self {
            Completion::Feedback { .. } => Operation::Feedback,
            Completion::Brainstorm(_) => Operation::Brainstorm,
            Completion::Chat(_) => Operation::Chat,
        }
    }

    /// Completion carrying `error` for the given operation
    pub fn failed(operation: Operation, project_id: Option<Uuid>, error: GatewayError) -> Self {
        match operation {
            Operation::Feedback => Completion::Feedback {
                project_id: project_id.unwrap_or_default(),
                result: Err(error),
            },
            Operation::Brainstorm => Completion::Brainstorm(Err(error)),
            Operation::Chat => Completion::Chat(Err(error)),
        }
    }
}

/// The last failure of an operation, kept until dismissed or retried
#[derive(Clone, Debug, PartialEq)]
pub struct OperationFailure {
    pub error: GatewayError,
    pub at: DateTime<Utc>,
}

impl OperationFailure {
    pub fn new(error: GatewayError) -> Self {
        Self {
            error,
            at: Utc::now(),
        }
    }
}
