//! The five mutually exclusive screens of a session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    ProjectCreation,
    Dashboard,
    /// Coaching chat and analysis for the selected project
    Sanctum,
    /// Brainstorm results
    MirrorDimension,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::ProjectCreation => "New Project",
            View::Dashboard => "Archive",
            View::Sanctum => "Sanctum",
            View::MirrorDimension => "Mirror Dimension",
        }
    }

    /// Screens that only make sense with a selected project
    pub fn requires_project(&self) -> bool {
        matches!(self, View::Sanctum)
    }
}
