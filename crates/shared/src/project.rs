//! Project records created from the "describe your reality" form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maturity of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Ideation,
    Prototype,
    MarketReady,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Ideation => "ideation",
            ProjectStatus::Prototype => "prototype",
            ProjectStatus::MarketReady => "market-ready",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project tracked for the lifetime of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique within the session
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub status: ProjectStatus,
    pub last_modified: DateTime<Utc>,
}

impl Project {
    /// Build a fresh project from validated form input
    pub fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            industry: draft.industry,
            status: ProjectStatus::default(),
            last_modified: Utc::now(),
        }
    }

    /// Date shown on dashboard cards ("last observed")
    pub fn observed_on(&self) -> String {
        self.last_modified.format("%Y-%m-%d").to_string()
    }
}

/// Project-creation form input that passed required-field checks.
///
/// The only way to get one is [`ProjectDraft::new`], so anything holding a
/// draft already satisfies the input boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    name: String,
    industry: String,
    description: String,
}

impl ProjectDraft {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = required("name", name.into())?;
        let industry = required("industry", industry.into())?;
        let description = required("description", description.into())?;
        Ok(Self {
            name,
            industry,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_every_field() {
        assert_eq!(
            ProjectDraft::new("", "Energy", "desc"),
            Err(ValidationError::MissingField { field: "name" })
        );
        assert_eq!(
            ProjectDraft::new("Portal", "   ", "desc"),
            Err(ValidationError::MissingField { field: "industry" })
        );
        assert_eq!(
            ProjectDraft::new("Portal", "Energy", "\n"),
            Err(ValidationError::MissingField { field: "description" })
        );
    }

    #[test]
    fn test_draft_trims_input() {
        let draft = ProjectDraft::new("  Portal Generator ", "Energy", " clean power ").unwrap();
        assert_eq!(draft.name(), "Portal Generator");
        assert_eq!(draft.description(), "clean power");
    }

    #[test]
    fn test_new_project_starts_in_ideation() {
        let draft = ProjectDraft::new("Portal Generator", "Energy", "...").unwrap();
        let project = Project::from_draft(draft);
        assert_eq!(project.status, ProjectStatus::Ideation);
        assert_eq!(project.industry, "Energy");
    }

    #[test]
    fn test_status_wire_names() {
        let v = serde_json::to_value(ProjectStatus::MarketReady).unwrap();
        assert_eq!(v, "market-ready");
        assert_eq!(ProjectStatus::Prototype.to_string(), "prototype");
    }
}
