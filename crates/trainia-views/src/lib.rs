//! Trainia Views
//!
//! Pure view-model derivations over store snapshots: course categorization
//! and visibility, dashboard and guide summaries, member and invitation
//! views, plus a deadline helper for batched refreshes. Nothing here talks
//! to the network or mutates store state.

pub mod courses;
pub mod dashboard;
pub mod guide;
pub mod members;
pub mod refresh;

pub use courses::{categorize_by_progress, completion_rate, visible_courses, ProgressBuckets};
pub use dashboard::{dashboard_summary, DashboardSummary};
pub use guide::{guide_progress, GuideProgress};
pub use members::{active_invitations, member_overview, MemberOverview};
pub use refresh::{refresh_all, with_deadline};
