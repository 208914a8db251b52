//! Course and enrollment endpoints.
//!
//! Course routes are scope-dependent: the personal catalog lives under the
//! user, organization catalogs under the organization.

use async_trait::async_trait;

use trainia_core::gateway::CourseGateway;
use trainia_core::models::{Course, MemberStats, ProgressUpdate, Scope};
use trainia_core::AppError;

use crate::{api_prefix, encode_id, ApiClient};

fn scope_course_path(scope: &Scope) -> String {
    match scope {
        Scope::Personal { user_id } => {
            format!("{}/users/{}/courses", api_prefix(), encode_id(user_id))
        }
        Scope::Organization { id, .. } => {
            format!("{}/organizations/{}/courses", api_prefix(), encode_id(id))
        }
    }
}

#[async_trait]
impl CourseGateway for ApiClient {
    async fn list_courses(&self, scope: &Scope) -> Result<Vec<Course>, AppError> {
        self.get_field(&scope_course_path(scope), &[], "courses")
            .await
    }

    async fn get_course(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError> {
        self.get_field(
            &format!("{}/{}", scope_course_path(scope), encode_id(course_id)),
            &[],
            "course",
        )
        .await
    }

    async fn enroll(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError> {
        self.post_empty_field(
            &format!(
                "{}/{}/enroll",
                scope_course_path(scope),
                encode_id(course_id)
            ),
            "course",
        )
        .await
    }

    async fn unenroll(&self, scope: &Scope, course_id: &str) -> Result<(), AppError> {
        self.delete_ok(&format!(
            "{}/{}/enrollment",
            scope_course_path(scope),
            encode_id(course_id)
        ))
        .await
    }

    async fn update_progress(
        &self,
        scope: &Scope,
        course_id: &str,
        update: &ProgressUpdate,
    ) -> Result<Course, AppError> {
        self.put_field(
            &format!(
                "{}/{}/progress",
                scope_course_path(scope),
                encode_id(course_id)
            ),
            update,
            "course",
        )
        .await
    }

    async fn complete_module(
        &self,
        scope: &Scope,
        course_id: &str,
        module_id: &str,
    ) -> Result<Course, AppError> {
        self.post_empty_field(
            &format!(
                "{}/{}/modules/{}/complete",
                scope_course_path(scope),
                encode_id(course_id),
                encode_id(module_id)
            ),
            "course",
        )
        .await
    }

    async fn get_member_stats(
        &self,
        org_id: &str,
        user_id: &str,
    ) -> Result<MemberStats, AppError> {
        self.get_field(
            &format!(
                "{}/organizations/{}/members/{}/stats",
                api_prefix(),
                encode_id(org_id),
                encode_id(user_id)
            ),
            &[],
            "stats",
        )
        .await
    }
}
