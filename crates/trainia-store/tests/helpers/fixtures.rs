//! Entity fixtures for store tests.

use chrono::{Duration, Utc};

use trainia_core::models::{
    Course, CourseModule, CourseSource, Invitation, InvitationStatus, Member, Organization, Role,
    Tag, User,
};

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{}@example.com", id.to_lowercase()),
        name: format!("User {}", id),
        container: format!("{}-blob", id.to_lowercase()),
        created_at: Utc::now(),
    }
}

pub fn organization(id: &str) -> Organization {
    Organization {
        id: id.to_string(),
        name: format!("Org {}", id),
        description: None,
        logo_url: None,
        container: format!("{}-blob", id.to_lowercase()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn member(user_id: &str, role: Role) -> Member {
    Member {
        user_id: user_id.to_string(),
        email: format!("{}@example.com", user_id.to_lowercase()),
        name: format!("User {}", user_id),
        role,
        tags: Vec::new(),
        joined_at: Utc::now(),
    }
}

pub fn member_with_tags(user_id: &str, role: Role, tags: Vec<Tag>) -> Member {
    Member {
        tags,
        ..member(user_id, role)
    }
}

pub fn tag(id: &str, org_id: &str) -> Tag {
    Tag {
        id: id.to_string(),
        organization_id: org_id.to_string(),
        name: format!("Tag {}", id),
        color: "#3B82F6".to_string(),
        description: None,
        created_at: Utc::now(),
    }
}

pub fn personal_course(id: &str, progress: f32) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Course {}", id),
        description: None,
        image_url: None,
        progress,
        modules: vec![
            CourseModule {
                id: format!("{}-m1", id),
                name: "Intro".to_string(),
                completed: progress > 0.0,
            },
            CourseModule {
                id: format!("{}-m2", id),
                name: "Practice".to_string(),
                completed: progress >= 100.0,
            },
        ],
        source: CourseSource::Personal,
        tag_ids: Vec::new(),
        enrolled_at: None,
    }
}

pub fn org_course(id: &str, org_id: &str, progress: f32, tag_ids: Vec<String>) -> Course {
    Course {
        source: CourseSource::Organization {
            organization_id: org_id.to_string(),
        },
        tag_ids,
        ..personal_course(id, progress)
    }
}

pub fn pending_invitation(id: &str, org_id: &str, email: &str) -> Invitation {
    Invitation {
        id: id.to_string(),
        organization_id: org_id.to_string(),
        email: email.to_string(),
        role: Role::Member,
        status: InvitationStatus::Pending,
        expires_at: Utc::now() + Duration::days(7),
        created_at: Utc::now(),
    }
}
