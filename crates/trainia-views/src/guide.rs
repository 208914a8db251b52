//! Guide (checklist) progress derived from a course's modules.

use trainia_core::models::{Course, CourseModule};

/// Step-level progress through a course, with the next step to surface in
/// the guide UI. `percent` comes from module counts, not the course's
/// server-reported progress, so the checklist and its bar always agree.
#[derive(Debug, Clone)]
pub struct GuideProgress {
    pub completed_steps: usize,
    pub total_steps: usize,
    pub percent: u32,
    pub next_step: Option<CourseModule>,
}

pub fn guide_progress(course: &Course) -> GuideProgress {
    let total = course.modules.len();
    let completed = course.modules.iter().filter(|m| m.completed).count();
    let percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };
    GuideProgress {
        completed_steps: completed,
        total_steps: total,
        percent,
        next_step: course.modules.iter().find(|m| !m.completed).cloned(),
    }
}
