//! Background execution of oracle requests
//!
//! Each request runs on its own thread with a private Tokio runtime and
//! reports back through a channel the session drains once per frame.

use crate::types::{Completion, Operation};
use providers::AiGateway;
use shared::agent_api::ChatMessage;
use shared::{GatewayError, Project};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use uuid::Uuid;

/// Work handed to a background thread
#[derive(Debug, Clone)]
pub enum Job {
    Feedback(Project),
    Brainstorm(String),
    Chat {
        history: Vec<ChatMessage>,
        message: String,
    },
}

impl Job {
    pub fn operation(&self) -> Operation {
        match self {
            Job::Feedback(_) => Operation::Feedback,
            Job::Brainstorm(_) => Operation::Brainstorm,
            Job::Chat { .. } => Operation::Chat,
        }
    }

    fn project_id(&self) -> Option<Uuid> {
        match self {
            Job::Feedback(project) => Some(project.id),
            _ => None,
        }
    }
}

/// Run `job` off the UI thread (non-blocking)
pub fn spawn_job(gateway: Arc<AiGateway>, job: Job, tx: Sender<Completion>) {
    let operation = job.operation();
    let project_id = job.project_id();

    tracing::debug!(
        operation = operation.as_str(),
        model = gateway.model(),
        "dispatching oracle request"
    );

    std::thread::spawn(move || {
        let tx_panic = tx.clone();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run_job(&gateway, job, &tx);
        }));
        if res.is_err() {
            tracing::error!(operation = operation.as_str(), "oracle request panicked");
            let _ = tx_panic.send(Completion::failed(
                operation,
                project_id,
                GatewayError::Join("the request thread panicked".into()),
            ));
        }
    });
}

fn run_job(gateway: &AiGateway, job: Job, tx: &Sender<Completion>) {
    let operation = job.operation();
    let project_id = job.project_id();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = tx.send(Completion::failed(
                operation,
                project_id,
                GatewayError::Join(format!("Failed to start async runtime: {}", e)),
            ));
            return;
        }
    };

    let completion = rt.block_on(async {
        match job {
            Job::Feedback(project) => Completion::Feedback {
                project_id: project.id,
                result: gateway.get_feedback(&project).await,
            },
            Job::Brainstorm(seed) => Completion::Brainstorm(gateway.generate_ideas(&seed).await),
            Job::Chat { history, message } => {
                Completion::Chat(gateway.send_chat(&history, &message).await)
            }
        }
    });

    // The receiver is gone only when the session was dropped
    let _ = tx.send(completion);
}
