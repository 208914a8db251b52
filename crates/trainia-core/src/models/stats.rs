use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-member training statistics as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    pub user_id: String,
    pub total_courses: u32,
    pub completed_courses: u32,
    pub in_progress_courses: u32,
    pub average_progress: f32,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Organization-wide training statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationStats {
    pub organization_id: String,
    pub member_count: u32,
    pub course_count: u32,
    pub completion_rate: u32,
    #[serde(default)]
    pub active_members: u32,
}
