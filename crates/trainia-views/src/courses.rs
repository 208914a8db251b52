//! Course list derivations: progress buckets, completion rate, and
//! tag-based visibility filtering.

use trainia_core::models::{Course, Tag};

/// Courses split by progress. A course belongs to exactly one bucket:
/// `not_started` at 0%, `completed` at 100%, `in_progress` in between.
#[derive(Debug, Default, Clone)]
pub struct ProgressBuckets {
    pub not_started: Vec<Course>,
    pub in_progress: Vec<Course>,
    pub completed: Vec<Course>,
}

pub fn categorize_by_progress(courses: &[Course]) -> ProgressBuckets {
    let mut buckets = ProgressBuckets::default();
    for course in courses {
        if course.is_completed() {
            buckets.completed.push(course.clone());
        } else if course.is_started() {
            buckets.in_progress.push(course.clone());
        } else {
            buckets.not_started.push(course.clone());
        }
    }
    buckets
}

/// Share of completed courses as a whole percentage, rounded. Empty input
/// reads as 0, not a division error.
pub fn completion_rate(courses: &[Course]) -> u32 {
    if courses.is_empty() {
        return 0;
    }
    let completed = courses.iter().filter(|c| c.is_completed()).count();
    ((completed as f64 / courses.len() as f64) * 100.0).round() as u32
}

/// Filter a catalog down to what a member with `member_tags` may see.
/// A course without tags is visible to everyone; a tagged course requires
/// at least one tag in common.
pub fn visible_courses(courses: &[Course], member_tags: &[Tag]) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| {
            course.tag_ids.is_empty()
                || course
                    .tag_ids
                    .iter()
                    .any(|id| member_tags.iter().any(|tag| &tag.id == id))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trainia_core::models::CourseSource;

    fn course(id: &str, progress: f32, tag_ids: Vec<&str>) -> Course {
        Course {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            image_url: None,
            progress,
            modules: Vec::new(),
            source: CourseSource::Personal,
            tag_ids: tag_ids.into_iter().map(String::from).collect(),
            enrolled_at: None,
        }
    }

    fn tag(id: &str) -> Tag {
        Tag {
            id: id.to_string(),
            organization_id: "O1".to_string(),
            name: id.to_string(),
            color: "#3B82F6".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_each_course_lands_in_exactly_one_bucket() {
        let courses = vec![
            course("a", 0.0, vec![]),
            course("b", 50.0, vec![]),
            course("c", 100.0, vec![]),
        ];
        let buckets = categorize_by_progress(&courses);
        assert_eq!(buckets.not_started.len(), 1);
        assert_eq!(buckets.in_progress.len(), 1);
        assert_eq!(buckets.completed.len(), 1);
        assert_eq!(buckets.not_started[0].id, "a");
        assert_eq!(buckets.in_progress[0].id, "b");
        assert_eq!(buckets.completed[0].id, "c");
    }

    #[test]
    fn test_completion_rate_rounds_and_handles_empty() {
        assert_eq!(completion_rate(&[]), 0);
        let courses = vec![
            course("a", 100.0, vec![]),
            course("b", 0.0, vec![]),
            course("c", 0.0, vec![]),
        ];
        // 1 of 3 completed: 33.33 rounds to 33.
        assert_eq!(completion_rate(&courses), 33);
        let courses = vec![
            course("a", 100.0, vec![]),
            course("b", 100.0, vec![]),
            course("c", 0.0, vec![]),
        ];
        assert_eq!(completion_rate(&courses), 67);
    }

    #[test]
    fn test_untagged_courses_are_visible_to_everyone() {
        let courses = vec![course("open", 0.0, vec![])];
        assert_eq!(visible_courses(&courses, &[]).len(), 1);
    }

    #[test]
    fn test_tagged_courses_require_a_matching_tag() {
        let courses = vec![
            course("open", 0.0, vec![]),
            course("sales-only", 0.0, vec!["t-sales"]),
            course("eng-only", 0.0, vec!["t-eng", "t-ops"]),
        ];

        let visible = visible_courses(&courses, &[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "open");

        let visible = visible_courses(&courses, &[tag("t-eng")]);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["open", "eng-only"]);
    }
}
