//! Organization, member, tag, and invitation endpoints.

use async_trait::async_trait;

use trainia_core::gateway::OrganizationGateway;
use trainia_core::models::{
    CreateInvitationRequest, CreateOrganizationRequest, CreateTagRequest, Invitation, Member,
    Organization, OrganizationStats, Role, Tag, UpdateOrganizationRequest, UpdateTagRequest,
};
use trainia_core::AppError;

use crate::{api_prefix, encode_id, ApiClient};

fn org_path(org_id: &str) -> String {
    format!("{}/organizations/{}", api_prefix(), encode_id(org_id))
}

#[async_trait]
impl OrganizationGateway for ApiClient {
    async fn list_organizations(&self, user_id: &str) -> Result<Vec<Organization>, AppError> {
        self.get_field(
            &format!("{}/users/{}/organizations", api_prefix(), encode_id(user_id)),
            &[],
            "organizations",
        )
        .await
    }

    async fn get_organization(&self, org_id: &str) -> Result<Organization, AppError> {
        self.get_field(&org_path(org_id), &[], "organization").await
    }

    async fn create_organization(
        &self,
        req: &CreateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        self.post_field(
            &format!("{}/organizations", api_prefix()),
            req,
            "organization",
        )
        .await
    }

    async fn update_organization(
        &self,
        org_id: &str,
        req: &UpdateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        self.put_field(&org_path(org_id), req, "organization").await
    }

    async fn delete_organization(&self, org_id: &str) -> Result<(), AppError> {
        self.delete_ok(&org_path(org_id)).await
    }

    async fn list_members(&self, org_id: &str) -> Result<Vec<Member>, AppError> {
        // Members are returned with their tags joined in.
        self.get_field(&format!("{}/members", org_path(org_id)), &[], "members")
            .await
    }

    async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role: Role,
    ) -> Result<Member, AppError> {
        self.put_field(
            &format!("{}/members/{}/role", org_path(org_id), encode_id(user_id)),
            &serde_json::json!({ "role": role }),
            "member",
        )
        .await
    }

    async fn remove_member(&self, org_id: &str, user_id: &str) -> Result<(), AppError> {
        self.delete_ok(&format!(
            "{}/members/{}",
            org_path(org_id),
            encode_id(user_id)
        ))
        .await
    }

    async fn list_tags(&self, org_id: &str) -> Result<Vec<Tag>, AppError> {
        self.get_field(&format!("{}/tags", org_path(org_id)), &[], "tags")
            .await
    }

    async fn create_tag(&self, org_id: &str, req: &CreateTagRequest) -> Result<Tag, AppError> {
        self.post_field(&format!("{}/tags", org_path(org_id)), req, "tag")
            .await
    }

    async fn update_tag(
        &self,
        org_id: &str,
        tag_id: &str,
        req: &UpdateTagRequest,
    ) -> Result<Tag, AppError> {
        self.put_field(
            &format!("{}/tags/{}", org_path(org_id), encode_id(tag_id)),
            req,
            "tag",
        )
        .await
    }

    async fn delete_tag(&self, org_id: &str, tag_id: &str) -> Result<(), AppError> {
        self.delete_ok(&format!("{}/tags/{}", org_path(org_id), encode_id(tag_id)))
            .await
    }

    async fn assign_tag_to_member(
        &self,
        org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.post_ok(&format!(
            "{}/tags/{}/members/{}",
            org_path(org_id),
            encode_id(tag_id),
            encode_id(user_id)
        ))
        .await
    }

    async fn remove_tag_from_member(
        &self,
        org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.delete_ok(&format!(
            "{}/tags/{}/members/{}",
            org_path(org_id),
            encode_id(tag_id),
            encode_id(user_id)
        ))
        .await
    }

    async fn list_tag_courses(&self, org_id: &str, tag_id: &str) -> Result<Vec<String>, AppError> {
        self.get_field(
            &format!("{}/tags/{}/courses", org_path(org_id), encode_id(tag_id)),
            &[],
            "courses",
        )
        .await
    }

    async fn assign_tag_to_course(
        &self,
        org_id: &str,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError> {
        self.post_ok(&format!(
            "{}/tags/{}/courses/{}",
            org_path(org_id),
            encode_id(tag_id),
            encode_id(course_id)
        ))
        .await
    }

    async fn remove_tag_from_course(
        &self,
        org_id: &str,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError> {
        self.delete_ok(&format!(
            "{}/tags/{}/courses/{}",
            org_path(org_id),
            encode_id(tag_id),
            encode_id(course_id)
        ))
        .await
    }

    async fn list_invitations(&self, org_id: &str) -> Result<Vec<Invitation>, AppError> {
        self.get_field(
            &format!("{}/invitations", org_path(org_id)),
            &[],
            "invitations",
        )
        .await
    }

    async fn create_invitation(
        &self,
        org_id: &str,
        req: &CreateInvitationRequest,
    ) -> Result<Invitation, AppError> {
        self.post_field(
            &format!("{}/invitations", org_path(org_id)),
            req,
            "invitation",
        )
        .await
    }

    async fn cancel_invitation(&self, org_id: &str, invitation_id: &str) -> Result<(), AppError> {
        self.delete_ok(&format!(
            "{}/invitations/{}",
            org_path(org_id),
            encode_id(invitation_id)
        ))
        .await
    }

    async fn resend_invitation(
        &self,
        org_id: &str,
        invitation_id: &str,
    ) -> Result<Invitation, AppError> {
        self.post_empty_field(
            &format!(
                "{}/invitations/{}/resend",
                org_path(org_id),
                encode_id(invitation_id)
            ),
            "invitation",
        )
        .await
    }

    async fn get_organization_stats(&self, org_id: &str) -> Result<OrganizationStats, AppError> {
        self.get_field(&format!("{}/stats", org_path(org_id)), &[], "stats")
            .await
    }
}
