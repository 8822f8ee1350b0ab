//! Coaching output produced by the oracle.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SWOT-style analysis of one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Maturity score in [0, 100]
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub recommendations: Vec<String>,
    /// Directions the project could take "in another universe"
    pub multiverse_alternatives: Vec<String>,
}

impl Feedback {
    pub fn score_in_range(&self) -> bool {
        self.score.is_finite() && (0.0..=100.0).contains(&self.score)
    }

    /// Score rounded for progress bars and labels
    pub fn score_percent(&self) -> u8 {
        self.score.clamp(0.0, 100.0).round() as u8
    }

    pub fn top_recommendation(&self) -> Option<&str> {
        self.recommendations.first().map(String::as_str)
    }
}

/// The latest analysis and the project it was produced for.
///
/// Selecting another project does not clear it; the sanctum uses
/// `project_id` to label an analysis that belongs elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub project_id: Uuid,
    pub feedback: Feedback,
}

impl FeedbackRecord {
    pub fn is_for(&self, project_id: Uuid) -> bool {
        self.project_id == project_id
    }
}
