//! Screens of the app.
//!
//! Each frame the shell derives a [`ScreenModel`] from the session, draws it,
//! and collects the user's intents as [`UiAction`]s. The actions are applied
//! to the session only after drawing has finished.

mod creation;
mod dashboard;
mod home;
mod mirror;
mod sanctum;

pub use creation::ProjectForm;

use crate::magic_circle::{AMBER, EMBER};
use crate::session::SessionController;
use crate::types::Operation;
use crate::utils::describe_failure;
use egui::{Color32, RichText, Ui};
use shared::agent_api::ChatMessage;
use shared::{FeedbackRecord, Project, ProjectDraft, View};
use uuid::Uuid;

pub const BACKGROUND: Color32 = Color32::from_rgb(0x0a, 0x0a, 0x0f);
pub const PANEL: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
pub const MIRROR_BLUE: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);

/// Something the user asked for while the frame was drawn
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(View),
    CreateProject(ProjectDraft),
    SelectProject(Uuid),
    RequestFeedback,
    /// Brainstorm seeded from the selected project
    Brainstorm,
    SendChat(String),
    DismissFailure(Operation),
    DismissNotice,
    OpenSettings,
}

/// Per-screen widget state that outlives a frame
#[derive(Default)]
pub struct ViewState {
    pub form: ProjectForm,
    pub chat_input: String,
}

pub struct SanctumModel<'a> {
    pub project: &'a Project,
    pub feedback: Option<&'a FeedbackRecord>,
    pub transcript: &'a [ChatMessage],
    pub analyzing: bool,
    pub chatting: bool,
    pub brainstorming: bool,
}

impl SanctumModel<'_> {
    /// Width of the reality-index bar, 10% until assessed
    pub fn reality_index(&self) -> u8 {
        self.feedback
            .map(|r| r.feedback.score_percent())
            .unwrap_or(10)
    }

    pub fn reality_label(&self) -> String {
        match self.feedback {
            Some(r) => format!("{}% reality", r.feedback.score_percent()),
            None => "not assessed".to_string(),
        }
    }

    /// The stored reading belongs to another project
    pub fn feedback_is_foreign(&self) -> bool {
        self.feedback.is_some_and(|r| !r.is_for(self.project.id))
    }
}

pub struct MirrorModel<'a> {
    pub ideas: &'a [String],
    pub brainstorming: bool,
}

/// What one frame shows, read from the session
pub enum ScreenModel<'a> {
    Home,
    ProjectCreation,
    Dashboard { projects: &'a [Project] },
    Sanctum(SanctumModel<'a>),
    MirrorDimension(MirrorModel<'a>),
}

impl<'a> ScreenModel<'a> {
    pub fn derive(session: &'a SessionController) -> Self {
        match session.view() {
            View::Home => ScreenModel::Home,
            View::ProjectCreation => ScreenModel::ProjectCreation,
            View::Dashboard => ScreenModel::Dashboard {
                projects: session.projects(),
            },
            View::Sanctum => match session.selected_project() {
                Some(project) => ScreenModel::Sanctum(SanctumModel {
                    project,
                    feedback: session.feedback(),
                    transcript: session.transcript(),
                    analyzing: session.is_pending(Operation::Feedback),
                    chatting: session.is_pending(Operation::Chat),
                    brainstorming: session.is_pending(Operation::Brainstorm),
                }),
                // Unreachable through navigation; show the archive instead
                None => ScreenModel::Dashboard {
                    projects: session.projects(),
                },
            },
            View::MirrorDimension => ScreenModel::MirrorDimension(MirrorModel {
                ideas: session.ideas(),
                brainstorming: session.is_pending(Operation::Brainstorm),
            }),
        }
    }

    pub fn view(&self) -> View {
        match self {
            ScreenModel::Home => View::Home,
            ScreenModel::ProjectCreation => View::ProjectCreation,
            ScreenModel::Dashboard { .. } => View::Dashboard,
            ScreenModel::Sanctum(_) => View::Sanctum,
            ScreenModel::MirrorDimension(_) => View::MirrorDimension,
        }
    }
}

/// Apply one action. Returns false for actions the shell must handle itself.
pub fn apply(session: &mut SessionController, action: UiAction) -> bool {
    match action {
        UiAction::Navigate(view) => {
            session.navigate(view);
        }
        UiAction::CreateProject(draft) => {
            session.create_project(draft);
        }
        UiAction::SelectProject(id) => {
            session.select_project(id);
        }
        UiAction::RequestFeedback => {
            session.request_feedback();
        }
        UiAction::Brainstorm => {
            session.request_brainstorm_for_selected();
        }
        UiAction::SendChat(text) => {
            session.send_chat_message(&text);
        }
        UiAction::DismissFailure(op) => session.dismiss_failure(op),
        UiAction::DismissNotice => session.dismiss_notice(),
        UiAction::OpenSettings => return false,
    }
    true
}

/// Draw the current screen into the central panel
pub fn draw_screen(ui: &mut Ui, model: &ScreenModel<'_>, state: &mut ViewState) -> Vec<UiAction> {
    let mut actions = Vec::new();
    match model {
        ScreenModel::Home => home::draw(ui, &mut actions),
        ScreenModel::ProjectCreation => creation::draw(ui, &mut state.form, &mut actions),
        ScreenModel::Dashboard { projects } => dashboard::draw(ui, projects, &mut actions),
        ScreenModel::Sanctum(m) => sanctum::draw(ui, m, &mut state.chat_input, &mut actions),
        ScreenModel::MirrorDimension(m) => mirror::draw(ui, m, &mut actions),
    }
    actions
}

pub fn draw_nav_bar(ui: &mut Ui, current: View, model: &str, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        let brand = ui.add(
            egui::Label::new(RichText::new("🧭 InnoAgent").size(20.0).strong().color(AMBER))
                .sense(egui::Sense::click()),
        );
        if brand.clicked() {
            actions.push(UiAction::Navigate(View::Home));
        }
        ui.label(RichText::new(format!("/ {}", current.title())).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⚙ Settings").clicked() {
                actions.push(UiAction::OpenSettings);
            }
            ui.label(RichText::new(model).small().weak());
            ui.add_space(16.0);
            if ui
                .selectable_label(current == View::Sanctum, "COACH")
                .clicked()
            {
                actions.push(UiAction::Navigate(View::Sanctum));
            }
            if ui
                .selectable_label(current == View::Dashboard, "ARCHIVE")
                .clicked()
            {
                actions.push(UiAction::Navigate(View::Dashboard));
            }
        });
    });
}

/// Dismissible banners for failed operations
pub fn draw_failures(ui: &mut Ui, session: &SessionController, actions: &mut Vec<UiAction>) {
    for op in [Operation::Feedback, Operation::Brainstorm, Operation::Chat] {
        let Some(failure) = session.failure(op) else {
            continue;
        };
        egui::Frame::none()
            .fill(Color32::from_rgb(0x3b, 0x0d, 0x0d))
            .stroke(egui::Stroke::new(1.0, EMBER))
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("⚠ {}", op.label())).strong().color(EMBER));
                    ui.label(
                        RichText::new(failure.at.format("%H:%M:%S").to_string())
                            .small()
                            .weak(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            actions.push(UiAction::DismissFailure(op));
                        }
                    });
                });
                ui.label(describe_failure(&failure.error));
            });
        ui.add_space(4.0);
    }
}

pub fn draw_notice(ctx: &egui::Context, notice: Option<&str>, actions: &mut Vec<UiAction>) {
    let Some(text) = notice else {
        return;
    };
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 80.0))
        .show(ctx, |ui| {
            ui.label(text);
            if ui.button("OK").clicked() {
                actions.push(UiAction::DismissNotice);
            }
        });
}

pub(crate) fn section_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(PANEL)
        .rounding(12.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, Color32::from_white_alpha(16)))
}

pub(crate) fn back_button(ui: &mut Ui, label: &str) -> bool {
    ui.add(egui::Button::new(RichText::new(format!("← {}", label)).color(AMBER)).frame(false))
        .clicked()
}
