use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a course's content comes from: the platform's default catalog or a
/// specific organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CourseSource {
    Personal,
    Organization { organization_id: String },
}

/// A module within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: String,
    pub name: String,
    pub completed: bool,
}

/// An enrollable learning unit ("training" / "build" in the UI).
///
/// `progress` is a percentage in `[0, 100]` and only moves forward; module
/// completion events raise it, nothing lowers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub progress: f32,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub source: CourseSource,
    /// Tag ids controlling visibility within an organization. Empty means
    /// visible to every member.
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn is_completed(&self) -> bool {
        self.progress >= 100.0
    }

    pub fn is_started(&self) -> bool {
        self.progress > 0.0
    }
}

/// Progress update payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProgressUpdate {
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress: f32,
}
