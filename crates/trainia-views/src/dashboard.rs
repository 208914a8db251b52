//! Dashboard summary: what the learner sees first after signing in.

use trainia_core::models::Course;

use crate::courses::{categorize_by_progress, completion_rate};

/// Snapshot-derived dashboard data. `recent` is the learner's latest
/// enrollments, newest first, capped by the caller.
#[derive(Debug, Default, Clone)]
pub struct DashboardSummary {
    pub total_courses: usize,
    pub completed_courses: usize,
    pub completion_rate: u32,
    pub in_progress: Vec<Course>,
    pub recent: Vec<Course>,
}

pub fn dashboard_summary(courses: &[Course], recent_limit: usize) -> DashboardSummary {
    let buckets = categorize_by_progress(courses);

    let mut recent: Vec<Course> = courses
        .iter()
        .filter(|c| c.enrolled_at.is_some())
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
    recent.truncate(recent_limit);

    DashboardSummary {
        total_courses: courses.len(),
        completed_courses: buckets.completed.len(),
        completion_rate: completion_rate(courses),
        in_progress: buckets.in_progress,
        recent,
    }
}
