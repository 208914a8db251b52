//! Organization store: the user's organizations plus the active
//! organization's members, tags, and invitations.
//!
//! Role-changing and owner-removal actions are checked client-side before
//! any network call so the UI gets immediate feedback; the server remains
//! the source of truth and can still reject.

use std::sync::Arc;

use validator::Validate;

use trainia_cache::TtlCache;
use trainia_core::config::CacheTtls;
use trainia_core::gateway::OrganizationGateway;
use trainia_core::models::{
    CreateInvitationRequest, CreateOrganizationRequest, CreateTagRequest, Invitation, Member,
    Organization, OrganizationStats, Role, Tag, UpdateOrganizationRequest, UpdateTagRequest,
};
use trainia_core::AppError;

use crate::state::{CachedResource, StoreState};

fn organizations_key(user_id: &str) -> String {
    format!("organizations:personal:{}", user_id)
}

fn org_family_key(family: &str, org_id: &str) -> String {
    format!("{}:org:{}", family, org_id)
}

pub struct OrganizationStore {
    gateway: Arc<dyn OrganizationGateway>,
    cache: Arc<TtlCache>,
    ttls: CacheTtls,
    organizations: CachedResource<Vec<Organization>>,
    members: CachedResource<Vec<Member>>,
    tags: CachedResource<Vec<Tag>>,
    invitations: CachedResource<Vec<Invitation>>,
}

impl OrganizationStore {
    pub fn new(gateway: Arc<dyn OrganizationGateway>, cache: Arc<TtlCache>, ttls: CacheTtls) -> Self {
        Self {
            gateway,
            cache,
            ttls,
            organizations: CachedResource::new(),
            members: CachedResource::new(),
            tags: CachedResource::new(),
            invitations: CachedResource::new(),
        }
    }

    pub async fn organizations_snapshot(&self) -> StoreState<Vec<Organization>> {
        self.organizations.snapshot().await
    }

    pub async fn members_snapshot(&self) -> StoreState<Vec<Member>> {
        self.members.snapshot().await
    }

    pub async fn tags_snapshot(&self) -> StoreState<Vec<Tag>> {
        self.tags.snapshot().await
    }

    pub async fn invitations_snapshot(&self) -> StoreState<Vec<Invitation>> {
        self.invitations.snapshot().await
    }

    // ---- fetches -----------------------------------------------------

    pub async fn fetch_organizations(
        &self,
        user_id: &str,
        force: bool,
    ) -> Result<Vec<Organization>, AppError> {
        let gateway = self.gateway.clone();
        let user_id_owned = user_id.to_string();
        self.organizations
            .fetch(
                &self.cache,
                &organizations_key(user_id),
                self.ttls.organizations,
                force,
                || async move { gateway.list_organizations(&user_id_owned).await },
            )
            .await
    }

    pub async fn fetch_members(&self, org_id: &str, force: bool) -> Result<Vec<Member>, AppError> {
        let gateway = self.gateway.clone();
        let org_id_owned = org_id.to_string();
        self.members
            .fetch(
                &self.cache,
                &org_family_key("members", org_id),
                self.ttls.members,
                force,
                || async move { gateway.list_members(&org_id_owned).await },
            )
            .await
    }

    pub async fn fetch_tags(&self, org_id: &str, force: bool) -> Result<Vec<Tag>, AppError> {
        let gateway = self.gateway.clone();
        let org_id_owned = org_id.to_string();
        self.tags
            .fetch(
                &self.cache,
                &org_family_key("tags", org_id),
                self.ttls.tags,
                force,
                || async move { gateway.list_tags(&org_id_owned).await },
            )
            .await
    }

    pub async fn fetch_invitations(
        &self,
        org_id: &str,
        force: bool,
    ) -> Result<Vec<Invitation>, AppError> {
        let gateway = self.gateway.clone();
        let org_id_owned = org_id.to_string();
        self.invitations
            .fetch(
                &self.cache,
                &org_family_key("invitations", org_id),
                self.ttls.invitations,
                force,
                || async move { gateway.list_invitations(&org_id_owned).await },
            )
            .await
    }

    /// Organization-wide stats, read through the cache. Stats churn with
    /// member activity, so they share the members TTL.
    pub async fn fetch_stats(
        &self,
        org_id: &str,
        force: bool,
    ) -> Result<OrganizationStats, AppError> {
        let key = org_family_key("stats", org_id);
        if force {
            self.cache.invalidate(&key).await;
        }
        let gateway = self.gateway.clone();
        let org_id = org_id.to_string();
        self.cache
            .fetch_with(&key, self.ttls.members, || async move {
                gateway.get_organization_stats(&org_id).await
            })
            .await
    }

    // ---- organization lifecycle -------------------------------------

    pub async fn create_organization(
        &self,
        req: &CreateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        req.validate().map_err(AppError::from)?;
        let org = self.gateway.create_organization(req).await?;
        self.cache.invalidate_prefix("organizations:").await;
        let created = org.clone();
        self.organizations
            .apply(move |orgs| orgs.push(created))
            .await;
        tracing::info!(org_id = %org.id, "Organization created");
        Ok(org)
    }

    pub async fn update_organization(
        &self,
        org_id: &str,
        req: &UpdateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        req.validate().map_err(AppError::from)?;
        let org = self.gateway.update_organization(org_id, req).await?;
        self.cache.invalidate_prefix("organizations:").await;
        let updated = org.clone();
        self.organizations
            .apply(move |orgs| {
                if let Some(existing) = orgs.iter_mut().find(|o| o.id == updated.id) {
                    *existing = updated;
                }
            })
            .await;
        Ok(org)
    }

    /// Delete an organization. The remote delete cascades; locally every
    /// cache partition belonging to the organization is invalidated.
    pub async fn delete_organization(&self, org_id: &str) -> Result<(), AppError> {
        self.gateway.delete_organization(org_id).await?;
        self.cache.invalidate_prefix("organizations:").await;
        for family in ["members", "tags", "invitations", "courses", "stats"] {
            self.cache
                .invalidate_prefix(&org_family_key(family, org_id))
                .await;
        }
        let org_id = org_id.to_string();
        self.organizations
            .apply(move |orgs| orgs.retain(|o| o.id != org_id))
            .await;
        Ok(())
    }

    // ---- members -----------------------------------------------------

    pub async fn update_member_role(
        &self,
        org_id: &str,
        acting_role: Role,
        user_id: &str,
        new_role: Role,
    ) -> Result<Member, AppError> {
        if let Err(err) = self
            .guard_member_change(acting_role, user_id, Some(new_role))
            .await
        {
            self.members.record_error(&err).await;
            return Err(err);
        }

        let member = self
            .gateway
            .update_member_role(org_id, user_id, new_role)
            .await?;
        self.cache
            .invalidate_prefix(&org_family_key("members", org_id))
            .await;
        let updated = member.clone();
        self.members
            .apply(move |members| {
                if let Some(existing) = members.iter_mut().find(|m| m.user_id == updated.user_id) {
                    *existing = updated;
                }
            })
            .await;
        tracing::info!(org_id = %org_id, user_id = %user_id, role = ?new_role, "Member role updated");
        Ok(member)
    }

    pub async fn remove_member(
        &self,
        org_id: &str,
        acting_role: Role,
        user_id: &str,
    ) -> Result<(), AppError> {
        if let Err(err) = self.guard_member_change(acting_role, user_id, None).await {
            self.members.record_error(&err).await;
            return Err(err);
        }

        self.gateway.remove_member(org_id, user_id).await?;
        self.cache
            .invalidate_prefix(&org_family_key("members", org_id))
            .await;
        let user_id_owned = user_id.to_string();
        self.members
            .apply(move |members| members.retain(|m| m.user_id != user_id_owned))
            .await;
        tracing::info!(org_id = %org_id, user_id = %user_id, "Member removed");
        Ok(())
    }

    /// Client-side precondition for member changes. `new_role` is `None` for
    /// removal. Targets unknown to local state pass through; the server
    /// enforces the invariant authoritatively.
    async fn guard_member_change(
        &self,
        acting_role: Role,
        user_id: &str,
        new_role: Option<Role>,
    ) -> Result<(), AppError> {
        if !acting_role.can_manage() {
            return Err(AppError::Validation(
                "Only admins and owners can manage members".to_string(),
            ));
        }

        let members = self.members.snapshot().await.data;
        let Some(target) = members.iter().find(|m| m.user_id == user_id) else {
            return Ok(());
        };

        let touches_ownership = target.role == Role::Owner || new_role == Some(Role::Owner);
        if touches_ownership && acting_role != Role::Owner {
            return Err(AppError::Validation(
                "Only the owner can transfer or revoke ownership".to_string(),
            ));
        }

        let demotes_owner = target.role == Role::Owner && new_role != Some(Role::Owner);
        if demotes_owner {
            let owner_count = members.iter().filter(|m| m.role == Role::Owner).count();
            if owner_count <= 1 {
                return Err(AppError::Validation(
                    "An organization must keep at least one owner".to_string(),
                ));
            }
        }

        Ok(())
    }

    // ---- tags --------------------------------------------------------

    pub async fn create_tag(
        &self,
        org_id: &str,
        acting_role: Role,
        req: &CreateTagRequest,
    ) -> Result<Tag, AppError> {
        self.require_manage(acting_role)?;
        req.validate().map_err(AppError::from)?;
        let tag = self.gateway.create_tag(org_id, req).await?;
        self.cache
            .invalidate_prefix(&org_family_key("tags", org_id))
            .await;
        let created = tag.clone();
        self.tags.apply(move |tags| tags.push(created)).await;
        Ok(tag)
    }

    pub async fn update_tag(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
        req: &UpdateTagRequest,
    ) -> Result<Tag, AppError> {
        self.require_manage(acting_role)?;
        req.validate().map_err(AppError::from)?;
        let tag = self.gateway.update_tag(org_id, tag_id, req).await?;
        self.cache
            .invalidate_prefix(&org_family_key("tags", org_id))
            .await;
        // Members carry embedded tag copies, so their partition goes stale too.
        self.cache
            .invalidate_prefix(&org_family_key("members", org_id))
            .await;
        let updated = tag.clone();
        self.tags
            .apply(move |tags| {
                if let Some(existing) = tags.iter_mut().find(|t| t.id == updated.id) {
                    *existing = updated;
                }
            })
            .await;
        Ok(tag)
    }

    /// Delete a tag. The remote delete cascades its member and course
    /// associations, so every partition that embeds the tag is invalidated.
    pub async fn delete_tag(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway.delete_tag(org_id, tag_id).await?;
        for family in ["tags", "members", "courses"] {
            self.cache
                .invalidate_prefix(&org_family_key(family, org_id))
                .await;
        }
        let tag_id_owned = tag_id.to_string();
        self.tags
            .apply(move |tags| tags.retain(|t| t.id != tag_id_owned))
            .await;
        let tag_id_owned = tag_id.to_string();
        self.members
            .apply(move |members| {
                for member in members.iter_mut() {
                    member.tags.retain(|t| t.id != tag_id_owned);
                }
            })
            .await;
        tracing::info!(org_id = %org_id, tag_id = %tag_id, "Tag deleted");
        Ok(())
    }

    pub async fn assign_tag_to_member(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway
            .assign_tag_to_member(org_id, tag_id, user_id)
            .await?;
        self.cache
            .invalidate_prefix(&org_family_key("members", org_id))
            .await;
        let tag = self
            .tags
            .snapshot()
            .await
            .data
            .into_iter()
            .find(|t| t.id == tag_id);
        let user_id_owned = user_id.to_string();
        self.members
            .apply(move |members| {
                if let (Some(tag), Some(member)) = (
                    tag,
                    members.iter_mut().find(|m| m.user_id == user_id_owned),
                ) {
                    if !member.has_tag(&tag.id) {
                        member.tags.push(tag);
                    }
                }
            })
            .await;
        Ok(())
    }

    pub async fn remove_tag_from_member(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway
            .remove_tag_from_member(org_id, tag_id, user_id)
            .await?;
        self.cache
            .invalidate_prefix(&org_family_key("members", org_id))
            .await;
        let tag_id_owned = tag_id.to_string();
        let user_id_owned = user_id.to_string();
        self.members
            .apply(move |members| {
                if let Some(member) = members.iter_mut().find(|m| m.user_id == user_id_owned) {
                    member.tags.retain(|t| t.id != tag_id_owned);
                }
            })
            .await;
        Ok(())
    }

    pub async fn assign_tag_to_course(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway
            .assign_tag_to_course(org_id, tag_id, course_id)
            .await?;
        // Course visibility depends on tag associations.
        self.cache
            .invalidate_prefix(&org_family_key("courses", org_id))
            .await;
        Ok(())
    }

    pub async fn remove_tag_from_course(
        &self,
        org_id: &str,
        acting_role: Role,
        tag_id: &str,
        course_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway
            .remove_tag_from_course(org_id, tag_id, course_id)
            .await?;
        self.cache
            .invalidate_prefix(&org_family_key("courses", org_id))
            .await;
        Ok(())
    }

    // ---- invitations -------------------------------------------------

    /// Create an invitation. On success the new PENDING invitation is
    /// appended locally and the organization's invitations partition is
    /// invalidated so the next fetch reconciles with the server.
    pub async fn create_invitation(
        &self,
        org_id: &str,
        acting_role: Role,
        req: &CreateInvitationRequest,
    ) -> Result<Invitation, AppError> {
        self.require_manage(acting_role)?;
        if let Err(err) = req.validate() {
            let err = AppError::from(err);
            self.invitations.record_error(&err).await;
            return Err(err);
        }
        if req.role == Role::Owner && acting_role != Role::Owner {
            let err = AppError::Validation(
                "Only the owner can invite another owner".to_string(),
            );
            self.invitations.record_error(&err).await;
            return Err(err);
        }

        let invitation = self.gateway.create_invitation(org_id, req).await?;
        self.cache
            .invalidate_prefix(&org_family_key("invitations", org_id))
            .await;
        let created = invitation.clone();
        self.invitations
            .apply(move |invitations| invitations.push(created))
            .await;
        tracing::info!(org_id = %org_id, email = %req.email, "Invitation created");
        Ok(invitation)
    }

    pub async fn cancel_invitation(
        &self,
        org_id: &str,
        acting_role: Role,
        invitation_id: &str,
    ) -> Result<(), AppError> {
        self.require_manage(acting_role)?;
        self.gateway.cancel_invitation(org_id, invitation_id).await?;
        self.cache
            .invalidate_prefix(&org_family_key("invitations", org_id))
            .await;
        let invitation_id = invitation_id.to_string();
        self.invitations
            .apply(move |invitations| invitations.retain(|i| i.id != invitation_id))
            .await;
        Ok(())
    }

    /// Re-send an invitation; the server refreshes its expiry and returns
    /// the updated record.
    pub async fn resend_invitation(
        &self,
        org_id: &str,
        acting_role: Role,
        invitation_id: &str,
    ) -> Result<Invitation, AppError> {
        self.require_manage(acting_role)?;
        let invitation = self.gateway.resend_invitation(org_id, invitation_id).await?;
        self.cache
            .invalidate_prefix(&org_family_key("invitations", org_id))
            .await;
        let refreshed = invitation.clone();
        self.invitations
            .apply(move |invitations| {
                if let Some(existing) = invitations.iter_mut().find(|i| i.id == refreshed.id) {
                    *existing = refreshed;
                }
            })
            .await;
        Ok(invitation)
    }

    fn require_manage(&self, acting_role: Role) -> Result<(), AppError> {
        if acting_role.can_manage() {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Only admins and owners can manage the organization".to_string(),
            ))
        }
    }
}
