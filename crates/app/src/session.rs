//! Session controller: the single owner of all mutable session state.
//!
//! Views read state through the accessors and change it only through the
//! named transitions below. Oracle requests are dispatched to background
//! threads; their results come back as [`Completion`]s that are applied on
//! the UI thread by [`SessionController::poll_completions`].

use crate::state::{spawn_job, Job};
use crate::types::{Completion, Operation, OperationFailure};
use providers::AiGateway;
use shared::agent_api::ChatMessage;
use shared::{FeedbackRecord, Project, ProjectDraft, View};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const SELECT_PROJECT_NOTICE: &str = "Select or create a project first";

pub struct SessionController {
    view: View,
    /// Most recent first
    projects: Vec<Project>,
    selected: Option<Uuid>,
    transcript: Vec<ChatMessage>,
    feedback: Option<FeedbackRecord>,
    ideas: Vec<String>,
    in_flight: HashSet<Operation>,
    failures: HashMap<Operation, OperationFailure>,
    notice: Option<String>,
    gateway: Arc<AiGateway>,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl SessionController {
    pub fn new(gateway: Arc<AiGateway>) -> Self {
        let (completion_tx, completion_rx) = channel();
        Self {
            view: View::default(),
            projects: Vec::new(),
            selected: None,
            transcript: Vec::new(),
            feedback: None,
            ideas: Vec::new(),
            in_flight: HashSet::new(),
            failures: HashMap::new(),
            notice: None,
            gateway,
            completion_tx,
            completion_rx,
        }
    }

    // ---- read access -------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected?;
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn feedback(&self) -> Option<&FeedbackRecord> {
        self.feedback.as_ref()
    }

    pub fn ideas(&self) -> &[String] {
        &self.ideas
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        self.in_flight.contains(&operation)
    }

    pub fn any_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn failure(&self, operation: Operation) -> Option<&OperationFailure> {
        self.failures.get(&operation)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    // ---- transitions -------------------------------------------------------

    /// Add a project, select it and open its sanctum
    pub fn create_project(&mut self, draft: ProjectDraft) -> &Project {
        let project = Project::from_draft(draft);
        tracing::info!(project_id = %project.id, "project created");
        self.selected = Some(project.id);
        self.projects.insert(0, project);
        self.view = View::Sanctum;
        &self.projects[0]
    }

    pub fn select_project(&mut self, id: Uuid) -> bool {
        if !self.projects.iter().any(|p| p.id == id) {
            self.notice = Some(SELECT_PROJECT_NOTICE.to_string());
            return false;
        }
        self.selected = Some(id);
        self.view = View::Sanctum;
        true
    }

    /// Switch screens; the sanctum needs a selected project
    pub fn navigate(&mut self, target: View) -> bool {
        if target.requires_project() && self.selected_project().is_none() {
            self.notice = Some(SELECT_PROJECT_NOTICE.to_string());
            return false;
        }
        self.view = target;
        true
    }

    pub fn request_feedback(&mut self) -> bool {
        let Some(project) = self.selected_project().cloned() else {
            self.notice = Some(SELECT_PROJECT_NOTICE.to_string());
            return false;
        };
        if !self.begin(Operation::Feedback) {
            return false;
        }
        self.dispatch(Job::Feedback(project));
        true
    }

    pub fn request_brainstorm(&mut self, seed: &str) -> bool {
        if !self.begin(Operation::Brainstorm) {
            return false;
        }
        self.dispatch(Job::Brainstorm(seed.to_string()));
        true
    }

    /// Brainstorm seeded from the selected project's description
    pub fn request_brainstorm_for_selected(&mut self) -> bool {
        let seed = self
            .selected_project()
            .map(|p| p.description.clone())
            .unwrap_or_default();
        self.request_brainstorm(&seed)
    }

    /// Append the user's message and ask the coach for a reply.
    ///
    /// Blank input is ignored. The user message stays in the transcript even
    /// if the reply fails.
    pub fn send_chat_message(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.is_pending(Operation::Chat) {
            return false;
        }
        let history = self.transcript.clone();
        self.transcript.push(ChatMessage::user(text));
        self.begin(Operation::Chat);
        self.dispatch(Job::Chat {
            history,
            message: text.to_string(),
        });
        true
    }

    pub fn dismiss_failure(&mut self, operation: Operation) {
        self.failures.remove(&operation);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Swap the oracle, e.g. after the API key changed.
    /// Requests already in flight finish against the old one.
    pub fn set_gateway(&mut self, gateway: Arc<AiGateway>) {
        self.gateway = gateway;
    }

    // ---- completions -------------------------------------------------------

    /// Apply every finished request (called each frame). Returns how many.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Block until one request finishes, then apply it
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply(completion);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn apply(&mut self, completion: Completion) {
        let operation = completion.operation();
        self.in_flight.remove(&operation);

        match completion {
            Completion::Feedback {
                project_id,
                result: Ok(feedback),
            } => {
                tracing::info!(score = feedback.score, "feedback received");
                self.feedback = Some(FeedbackRecord {
                    project_id,
                    feedback,
                });
            }
            Completion::Brainstorm(Ok(ideas)) => {
                tracing::info!(count = ideas.len(), "brainstorm received");
                self.ideas = ideas;
                self.view = View::MirrorDimension;
            }
            Completion::Chat(Ok(reply)) => {
                tracing::info!("coach replied");
                self.transcript.push(ChatMessage::assistant(reply));
            }
            Completion::Feedback { result: Err(e), .. }
            | Completion::Brainstorm(Err(e))
            | Completion::Chat(Err(e)) => {
                tracing::warn!(operation = operation.as_str(), error = %e, "oracle request failed");
                self.failures.insert(operation, OperationFailure::new(e));
            }
        }
    }

    // ---- helpers -----------------------------------------------------------

    /// Mark `operation` in flight unless it already is
    fn begin(&mut self, operation: Operation) -> bool {
        if !self.in_flight.insert(operation) {
            tracing::debug!(operation = operation.as_str(), "request already pending");
            return false;
        }
        self.failures.remove(&operation);
        true
    }

    fn dispatch(&self, job: Job) {
        spawn_job(self.gateway.clone(), job, self.completion_tx.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use providers::testing::ScriptedOracle;
    use shared::GatewayError;

    const WAIT: Duration = Duration::from_secs(10);

    const FEEDBACK_JSON: &str = r#"{"score":72,"strengths":["novel approach"],"weaknesses":[],"opportunities":[],"threats":["competition"],"recommendations":["pivot messaging"],"multiverseAlternatives":["alt direction"]}"#;

    fn session_with(oracle: Arc<ScriptedOracle>) -> SessionController {
        SessionController::new(Arc::new(AiGateway::new(oracle)))
    }

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft::new(name, "Energy", "...").unwrap()
    }

    #[test]
    fn test_starts_on_home() {
        let session = session_with(ScriptedOracle::new(vec![]));
        assert_eq!(session.view(), View::Home);
        assert!(session.projects().is_empty());
        assert!(!session.any_pending());
    }

    #[test]
    fn test_create_project_scenario() {
        let mut session = session_with(ScriptedOracle::new(vec![]));
        let id = session.create_project(draft("Portal Generator")).id;

        assert_eq!(session.projects().len(), 1);
        assert_eq!(session.selected_project().map(|p| p.id), Some(id));
        assert_eq!(session.selected_project().unwrap().name, "Portal Generator");
        assert_eq!(session.view(), View::Sanctum);
    }

    #[test]
    fn test_projects_are_most_recent_first_with_unique_ids() {
        for count in [0usize, 1, 2, 5, 12] {
            let mut session = session_with(ScriptedOracle::new(vec![]));
            let mut ids = Vec::new();
            for i in 0..count {
                let id = session.create_project(draft(&format!("project {}", i))).id;
                ids.push(id);
                assert_eq!(session.projects().len(), i + 1);
                assert_eq!(session.selected_project().map(|p| p.id), Some(id));
            }

            let names: Vec<String> = session.projects().iter().map(|p| p.name.clone()).collect();
            let expected: Vec<String> =
                (0..count).rev().map(|i| format!("project {}", i)).collect();
            assert_eq!(names, expected, "order after {} creates", count);

            let listed: Vec<Uuid> = session.projects().iter().map(|p| p.id).collect();
            assert_eq!(listed, ids.iter().rev().copied().collect::<Vec<_>>());

            let unique: HashSet<Uuid> = ids.iter().copied().collect();
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_blank_chat_does_not_touch_transcript() {
        let oracle = ScriptedOracle::new(vec![]);
        let mut session = session_with(oracle.clone());
        assert!(!session.send_chat_message(""));
        assert!(!session.send_chat_message("   \t\n"));
        assert!(session.transcript().is_empty());
        assert!(!session.is_pending(Operation::Chat));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn test_feedback_success_is_stored() {
        let mut session = session_with(ScriptedOracle::replying(FEEDBACK_JSON));
        let id = session.create_project(draft("Portal Generator")).id;

        assert!(session.request_feedback());
        assert!(session.is_pending(Operation::Feedback));
        assert!(session.wait_for_completion(WAIT));

        let record = session.feedback().unwrap();
        assert!(record.is_for(id));
        assert_eq!(record.feedback.score, 72.0);
        assert_eq!(record.feedback.recommendations[0], "pivot messaging");
        assert!((0.0..=100.0).contains(&record.feedback.score));
        assert!(!session.is_pending(Operation::Feedback));
        assert!(session.failure(Operation::Feedback).is_none());
    }

    #[test]
    fn test_failed_feedback_keeps_prior_result() {
        let oracle = ScriptedOracle::new(vec![
            Ok(FEEDBACK_JSON.to_string()),
            Err(GatewayError::Transport("connection reset".into())),
        ]);
        let mut session = session_with(oracle);
        session.create_project(draft("Portal Generator"));

        session.request_feedback();
        session.wait_for_completion(WAIT);
        let before = session.feedback().cloned();

        assert!(session.request_feedback());
        assert!(session.wait_for_completion(WAIT));

        assert_eq!(session.feedback().cloned(), before);
        assert!(!session.is_pending(Operation::Feedback));
        let failure = session.failure(Operation::Feedback).unwrap();
        assert!(failure.error.is_transport());
    }

    #[test]
    fn test_feedback_parse_failure_is_surfaced() {
        let mut session = session_with(ScriptedOracle::replying("not json"));
        session.create_project(draft("Portal Generator"));
        session.request_feedback();
        session.wait_for_completion(WAIT);

        assert!(session.feedback().is_none());
        assert!(session.failure(Operation::Feedback).unwrap().error.is_parse());
    }

    #[test]
    fn test_rapid_feedback_requests_issue_one_call() {
        let oracle = ScriptedOracle::new(vec![
            Ok(FEEDBACK_JSON.to_string()),
            Ok(FEEDBACK_JSON.to_string()),
        ]);
        let mut session = session_with(oracle.clone());
        session.create_project(draft("Portal Generator"));

        assert!(session.request_feedback());
        assert!(!session.request_feedback());
        assert!(session.wait_for_completion(WAIT));
        assert!(!session.wait_for_completion(Duration::from_millis(200)));

        assert_eq!(oracle.calls(), 1);
    }

    #[test]
    fn test_feedback_needs_a_selected_project() {
        let oracle = ScriptedOracle::new(vec![]);
        let mut session = session_with(oracle.clone());
        assert!(!session.request_feedback());
        assert_eq!(session.notice(), Some(SELECT_PROJECT_NOTICE));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn test_brainstorm_success_opens_mirror_dimension() {
        let oracle = ScriptedOracle::replying(r#"["idea one","idea two"]"#);
        let mut session = session_with(oracle.clone());
        session.create_project(ProjectDraft::new("Portal", "Energy", "clean portals").unwrap());

        assert!(session.request_brainstorm_for_selected());
        assert!(session.wait_for_completion(WAIT));

        assert_eq!(session.view(), View::MirrorDimension);
        assert_eq!(session.ideas(), &["idea one".to_string(), "idea two".to_string()]);
        assert!(oracle.last_prompt().unwrap().contains("clean portals"));
    }

    #[test]
    fn test_brainstorm_failure_keeps_view() {
        let mut session = session_with(ScriptedOracle::replying("no multiverse today"));
        session.create_project(draft("Portal"));
        session.request_brainstorm("seed");
        session.wait_for_completion(WAIT);

        assert_eq!(session.view(), View::Sanctum);
        assert!(session.ideas().is_empty());
        assert!(session.failure(Operation::Brainstorm).is_some());
        assert!(!session.is_pending(Operation::Brainstorm));
    }

    #[test]
    fn test_chat_round_trip_replays_history() {
        let oracle = ScriptedOracle::new(vec![
            Ok("Greetings.".to_string()),
            Ok("Your timeline holds.".to_string()),
        ]);
        let mut session = session_with(oracle.clone());

        assert!(session.send_chat_message("  hello "));
        assert_eq!(session.transcript(), &[ChatMessage::user("hello")]);
        session.wait_for_completion(WAIT);

        assert!(session.send_chat_message("will it work?"));
        session.wait_for_completion(WAIT);

        assert_eq!(session.transcript().len(), 4);
        assert_eq!(
            session.transcript()[3],
            ChatMessage::assistant("Your timeline holds.")
        );
        let last = oracle.last_request().unwrap();
        assert_eq!(last.contents.len(), 3);
        assert_eq!(last.contents[1], ChatMessage::assistant("Greetings."));
    }

    #[test]
    fn test_chat_failure_leaves_user_message_without_reply() {
        let oracle = ScriptedOracle::new(vec![Err(GatewayError::MissingCredential)]);
        let mut session = session_with(oracle);
        session.send_chat_message("anyone there?");
        session.wait_for_completion(WAIT);

        assert_eq!(session.transcript(), &[ChatMessage::user("anyone there?")]);
        assert!(!session.is_pending(Operation::Chat));
        assert_eq!(
            session.failure(Operation::Chat).map(|f| &f.error),
            Some(&GatewayError::MissingCredential)
        );
    }

    #[test]
    fn test_chat_rejected_while_pending() {
        let oracle = ScriptedOracle::new(vec![Ok("one".into()), Ok("two".into())]);
        let mut session = session_with(oracle.clone());
        assert!(session.send_chat_message("first"));
        assert!(!session.send_chat_message("second"));
        assert_eq!(session.transcript().len(), 1);
        session.wait_for_completion(WAIT);
        assert_eq!(oracle.calls(), 1);
    }

    #[test]
    fn test_operations_are_independent() {
        let oracle = ScriptedOracle::new(vec![
            Ok(FEEDBACK_JSON.to_string()),
            Ok("[\"x\"]".to_string()),
            Ok("hi".to_string()),
        ]);
        let mut session = session_with(oracle);
        session.create_project(draft("Portal"));

        assert!(session.request_feedback());
        assert!(session.request_brainstorm("seed"));
        assert!(session.send_chat_message("hello"));
        for _ in 0..3 {
            assert!(session.wait_for_completion(WAIT));
        }
        assert!(!session.any_pending());
    }

    #[test]
    fn test_sanctum_requires_selection() {
        let mut session = session_with(ScriptedOracle::new(vec![]));
        session.navigate(View::Dashboard);

        assert!(!session.navigate(View::Sanctum));
        assert_eq!(session.view(), View::Dashboard);
        assert_eq!(session.notice(), Some(SELECT_PROJECT_NOTICE));

        session.dismiss_notice();
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_navigation_is_otherwise_unconditional() {
        let mut session = session_with(ScriptedOracle::new(vec![]));
        for view in [
            View::ProjectCreation,
            View::Dashboard,
            View::MirrorDimension,
            View::Home,
        ] {
            assert!(session.navigate(view));
            assert_eq!(session.view(), view);
        }
    }

    #[test]
    fn test_select_project() {
        let mut session = session_with(ScriptedOracle::new(vec![]));
        let first = session.create_project(draft("first")).id;
        session.create_project(draft("second"));
        session.navigate(View::Dashboard);

        assert!(session.select_project(first));
        assert_eq!(session.view(), View::Sanctum);
        assert_eq!(session.selected_project().unwrap().name, "first");

        session.navigate(View::Dashboard);
        assert!(!session.select_project(Uuid::new_v4()));
        assert_eq!(session.view(), View::Dashboard);
        assert_eq!(session.selected_project().unwrap().name, "first");
    }

    #[test]
    fn test_switching_project_keeps_feedback() {
        let mut session = session_with(ScriptedOracle::replying(FEEDBACK_JSON));
        let first = session.create_project(draft("first")).id;
        session.request_feedback();
        session.wait_for_completion(WAIT);

        let second = session.create_project(draft("second")).id;
        let record = session.feedback().unwrap();
        assert!(record.is_for(first));
        assert!(!record.is_for(second));
    }

    #[test]
    fn test_retry_clears_previous_failure() {
        let oracle = ScriptedOracle::new(vec![
            Err(GatewayError::Transport("down".into())),
            Ok("[\"back\"]".into()),
        ]);
        let mut session = session_with(oracle);
        session.request_brainstorm("seed");
        session.wait_for_completion(WAIT);
        assert!(session.failure(Operation::Brainstorm).is_some());

        session.request_brainstorm("seed");
        assert!(session.failure(Operation::Brainstorm).is_none());
        session.wait_for_completion(WAIT);
        assert_eq!(session.ideas(), &["back".to_string()]);
    }

    #[test]
    fn test_poll_without_results_is_non_blocking() {
        let mut session = session_with(ScriptedOracle::new(vec![]));
        assert_eq!(session.poll_completions(), 0);
    }

    #[test]
    fn test_set_gateway_routes_new_requests() {
        let old = ScriptedOracle::new(vec![]);
        let new = ScriptedOracle::replying("[\"fresh\"]");
        let mut session = session_with(old.clone());
        session.set_gateway(Arc::new(AiGateway::new(new.clone())));

        session.request_brainstorm("seed");
        session.wait_for_completion(WAIT);
        assert_eq!(old.calls(), 0);
        assert_eq!(new.calls(), 1);
    }
}
