//! Member and invitation views for the organization admin pages.

use chrono::{DateTime, Utc};

use trainia_core::models::{Invitation, Member, MemberStats, Role};

/// One row of the members table: membership joined with training stats.
/// Stats are fetched separately and may not have arrived yet.
#[derive(Debug, Clone)]
pub struct MemberOverview {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub tag_names: Vec<String>,
    pub completed_courses: u32,
    pub total_courses: u32,
    pub average_progress: f32,
    pub last_activity: Option<DateTime<Utc>>,
}

pub fn member_overview(member: &Member, stats: Option<&MemberStats>) -> MemberOverview {
    MemberOverview {
        user_id: member.user_id.clone(),
        name: member.name.clone(),
        email: member.email.clone(),
        role: member.role,
        tag_names: member.tags.iter().map(|t| t.name.clone()).collect(),
        completed_courses: stats.map(|s| s.completed_courses).unwrap_or(0),
        total_courses: stats.map(|s| s.total_courses).unwrap_or(0),
        average_progress: stats.map(|s| s.average_progress).unwrap_or(0.0),
        last_activity: stats.and_then(|s| s.last_activity),
    }
}

/// Invitations worth showing as actionable: PENDING and not past their
/// deadline. Expiry is derived at read time, never trusted from the
/// persisted status alone.
pub fn active_invitations(invitations: &[Invitation], now: DateTime<Utc>) -> Vec<Invitation> {
    invitations
        .iter()
        .filter(|inv| {
            inv.status == trainia_core::models::InvitationStatus::Pending
                && !inv.is_effectively_expired(now)
        })
        .cloned()
        .collect()
}
