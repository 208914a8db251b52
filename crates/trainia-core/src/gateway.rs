//! Gateway traits for remote data access.
//!
//! Entity stores depend on these traits rather than on a concrete HTTP
//! client, so tests inject mock gateways and the composition root injects
//! the real `ApiClient` from `trainia-client`.
//!
//! Every method performs exactly one remote round trip, returns only the
//! relevant payload, and carries no caching or state.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{
    Course, CreateInvitationRequest, CreateOrganizationRequest, CreateTagRequest, Invitation,
    Member, MemberStats, Organization, OrganizationStats, ProgressUpdate, Role, Scope, Tag,
    UpdateOrganizationRequest, UpdateTagRequest, User, UserUpdate,
};

/// Remote operations on the authenticated user.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User, AppError>;

    async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, AppError>;

    /// Deletes the account remotely. Local cache/store cleanup is the
    /// caller's responsibility.
    async fn delete_account(&self, user_id: &str) -> Result<(), AppError>;
}

/// Remote operations on organizations and their members, tags, and
/// invitations.
#[async_trait]
pub trait OrganizationGateway: Send + Sync {
    async fn list_organizations(&self, user_id: &str) -> Result<Vec<Organization>, AppError>;

    async fn get_organization(&self, org_id: &str) -> Result<Organization, AppError>;

    async fn create_organization(
        &self,
        req: &CreateOrganizationRequest,
    ) -> Result<Organization, AppError>;

    async fn update_organization(
        &self,
        org_id: &str,
        req: &UpdateOrganizationRequest,
    ) -> Result<Organization, AppError>;

    async fn delete_organization(&self, org_id: &str) -> Result<(), AppError>;

    /// Members together with their assigned tags.
    async fn list_members(&self, org_id: &str) -> Result<Vec<Member>, AppError>;

    async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role: Role,
    ) -> Result<Member, AppError>;

    async fn remove_member(&self, org_id: &str, user_id: &str) -> Result<(), AppError>;

    async fn list_tags(&self, org_id: &str) -> Result<Vec<Tag>, AppError>;

    async fn create_tag(&self, org_id: &str, req: &CreateTagRequest) -> Result<Tag, AppError>;

    async fn update_tag(
        &self,
        org_id: &str,
        tag_id: &str,
        req: &UpdateTagRequest,
    ) -> Result<Tag, AppError>;

    /// Deleting a tag cascades remotely: its member and course associations
    /// are removed server-side.
    async fn delete_tag(&self, org_id: &str, tag_id: &str) -> Result<(), AppError>;

    async fn assign_tag_to_member(
        &self,
        org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError>;

    async fn remove_tag_from_member(
        &self,
        org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError>;

    /// Course ids the tag is associated with.
    async fn list_tag_courses(&self, org_id: &str, tag_id: &str) -> Result<Vec<String>, AppError>;

    async fn assign_tag_to_course(
        &self,
        org_id: &str,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError>;

    async fn remove_tag_from_course(
        &self,
        org_id: &str,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError>;

    async fn list_invitations(&self, org_id: &str) -> Result<Vec<Invitation>, AppError>;

    async fn create_invitation(
        &self,
        org_id: &str,
        req: &CreateInvitationRequest,
    ) -> Result<Invitation, AppError>;

    async fn cancel_invitation(&self, org_id: &str, invitation_id: &str) -> Result<(), AppError>;

    async fn resend_invitation(
        &self,
        org_id: &str,
        invitation_id: &str,
    ) -> Result<Invitation, AppError>;

    async fn get_organization_stats(&self, org_id: &str) -> Result<OrganizationStats, AppError>;
}

/// Remote operations on courses and enrollment progress.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    /// Courses available under the given scope (personal catalog or an
    /// organization's catalog), unfiltered by tags.
    async fn list_courses(&self, scope: &Scope) -> Result<Vec<Course>, AppError>;

    async fn get_course(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError>;

    async fn enroll(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError>;

    async fn unenroll(&self, scope: &Scope, course_id: &str) -> Result<(), AppError>;

    async fn update_progress(
        &self,
        scope: &Scope,
        course_id: &str,
        update: &ProgressUpdate,
    ) -> Result<Course, AppError>;

    async fn complete_module(
        &self,
        scope: &Scope,
        course_id: &str,
        module_id: &str,
    ) -> Result<Course, AppError>;

    async fn get_member_stats(&self, org_id: &str, user_id: &str)
        -> Result<MemberStats, AppError>;
}
