//! Mock gateway implementations backed by in-memory state, with per-method
//! call counters so tests can assert which operations reached the "server".

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use trainia_core::gateway::{CourseGateway, OrganizationGateway, UserGateway};
use trainia_core::models::{
    Course, CreateInvitationRequest, CreateOrganizationRequest, CreateTagRequest, Invitation,
    InvitationStatus, Member, MemberStats, Organization, OrganizationStats, ProgressUpdate, Role,
    Scope, Tag, UpdateOrganizationRequest, UpdateTagRequest, User, UserUpdate,
};
use trainia_core::AppError;

use super::fixtures;

#[derive(Default)]
pub struct CallLog {
    counts: Mutex<HashMap<String, usize>>,
}

impl CallLog {
    pub fn bump(&self, name: &str) {
        let mut counts = self.counts.lock().unwrap();
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, name: &str) -> usize {
        *self.counts.lock().unwrap().get(name).unwrap_or(&0)
    }
}

// ---- user ------------------------------------------------------------

#[derive(Default)]
pub struct MockUserGateway {
    pub user: Mutex<Option<User>>,
    pub calls: CallLog,
}

impl MockUserGateway {
    pub fn with_user(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
            calls: CallLog::default(),
        }
    }
}

#[async_trait]
impl UserGateway for MockUserGateway {
    async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        self.calls.bump("get_user");
        self.user
            .lock()
            .unwrap()
            .clone()
            .filter(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, AppError> {
        self.calls.bump("update_user");
        let mut slot = self.user.lock().unwrap();
        let user = slot
            .as_mut()
            .filter(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        Ok(user.clone())
    }

    async fn delete_account(&self, _user_id: &str) -> Result<(), AppError> {
        self.calls.bump("delete_account");
        *self.user.lock().unwrap() = None;
        Ok(())
    }
}

// ---- organization ----------------------------------------------------

#[derive(Default)]
pub struct MockOrganizationGateway {
    pub organizations: Mutex<Vec<Organization>>,
    pub members: Mutex<Vec<Member>>,
    pub tags: Mutex<Vec<Tag>>,
    pub invitations: Mutex<Vec<Invitation>>,
    pub calls: CallLog,
}

impl MockOrganizationGateway {
    pub fn with_members(org: Organization, members: Vec<Member>) -> Self {
        Self {
            organizations: Mutex::new(vec![org]),
            members: Mutex::new(members),
            ..Default::default()
        }
    }
}

#[async_trait]
impl OrganizationGateway for MockOrganizationGateway {
    async fn list_organizations(&self, _user_id: &str) -> Result<Vec<Organization>, AppError> {
        self.calls.bump("list_organizations");
        Ok(self.organizations.lock().unwrap().clone())
    }

    async fn get_organization(&self, org_id: &str) -> Result<Organization, AppError> {
        self.calls.bump("get_organization");
        self.organizations
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == org_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("organization {}", org_id)))
    }

    async fn create_organization(
        &self,
        req: &CreateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        self.calls.bump("create_organization");
        let mut orgs = self.organizations.lock().unwrap();
        let org = Organization {
            name: req.name.clone(),
            description: req.description.clone(),
            logo_url: req.logo_url.clone(),
            ..fixtures::organization(&format!("org-{}", orgs.len() + 1))
        };
        orgs.push(org.clone());
        Ok(org)
    }

    async fn update_organization(
        &self,
        org_id: &str,
        req: &UpdateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        self.calls.bump("update_organization");
        let mut orgs = self.organizations.lock().unwrap();
        let org = orgs
            .iter_mut()
            .find(|o| o.id == org_id)
            .ok_or_else(|| AppError::NotFound(format!("organization {}", org_id)))?;
        if let Some(name) = &req.name {
            org.name = name.clone();
        }
        if let Some(description) = &req.description {
            org.description = Some(description.clone());
        }
        org.updated_at = Utc::now();
        Ok(org.clone())
    }

    async fn delete_organization(&self, org_id: &str) -> Result<(), AppError> {
        self.calls.bump("delete_organization");
        self.organizations.lock().unwrap().retain(|o| o.id != org_id);
        Ok(())
    }

    async fn list_members(&self, _org_id: &str) -> Result<Vec<Member>, AppError> {
        self.calls.bump("list_members");
        Ok(self.members.lock().unwrap().clone())
    }

    async fn update_member_role(
        &self,
        _org_id: &str,
        user_id: &str,
        role: Role,
    ) -> Result<Member, AppError> {
        self.calls.bump("update_member_role");
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("member {}", user_id)))?;
        member.role = role;
        Ok(member.clone())
    }

    async fn remove_member(&self, _org_id: &str, user_id: &str) -> Result<(), AppError> {
        self.calls.bump("remove_member");
        self.members.lock().unwrap().retain(|m| m.user_id != user_id);
        Ok(())
    }

    async fn list_tags(&self, _org_id: &str) -> Result<Vec<Tag>, AppError> {
        self.calls.bump("list_tags");
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn create_tag(&self, org_id: &str, req: &CreateTagRequest) -> Result<Tag, AppError> {
        self.calls.bump("create_tag");
        let mut tags = self.tags.lock().unwrap();
        let tag = Tag {
            name: req.name.clone(),
            color: req.color.clone(),
            description: req.description.clone(),
            ..fixtures::tag(&format!("tag-{}", tags.len() + 1), org_id)
        };
        tags.push(tag.clone());
        Ok(tag)
    }

    async fn update_tag(
        &self,
        _org_id: &str,
        tag_id: &str,
        req: &UpdateTagRequest,
    ) -> Result<Tag, AppError> {
        self.calls.bump("update_tag");
        let mut tags = self.tags.lock().unwrap();
        let tag = tags
            .iter_mut()
            .find(|t| t.id == tag_id)
            .ok_or_else(|| AppError::NotFound(format!("tag {}", tag_id)))?;
        if let Some(name) = &req.name {
            tag.name = name.clone();
        }
        if let Some(color) = &req.color {
            tag.color = color.clone();
        }
        Ok(tag.clone())
    }

    async fn delete_tag(&self, _org_id: &str, tag_id: &str) -> Result<(), AppError> {
        self.calls.bump("delete_tag");
        self.tags.lock().unwrap().retain(|t| t.id != tag_id);
        for member in self.members.lock().unwrap().iter_mut() {
            member.tags.retain(|t| t.id != tag_id);
        }
        Ok(())
    }

    async fn assign_tag_to_member(
        &self,
        _org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.calls.bump("assign_tag_to_member");
        let tag = self
            .tags
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == tag_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("tag {}", tag_id)))?;
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("member {}", user_id)))?;
        if !member.has_tag(tag_id) {
            member.tags.push(tag);
        }
        Ok(())
    }

    async fn remove_tag_from_member(
        &self,
        _org_id: &str,
        tag_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        self.calls.bump("remove_tag_from_member");
        let mut members = self.members.lock().unwrap();
        if let Some(member) = members.iter_mut().find(|m| m.user_id == user_id) {
            member.tags.retain(|t| t.id != tag_id);
        }
        Ok(())
    }

    async fn list_tag_courses(
        &self,
        _org_id: &str,
        _tag_id: &str,
    ) -> Result<Vec<String>, AppError> {
        self.calls.bump("list_tag_courses");
        Ok(Vec::new())
    }

    async fn assign_tag_to_course(
        &self,
        _org_id: &str,
        _tag_id: &str,
        _course_id: &str,
    ) -> Result<(), AppError> {
        self.calls.bump("assign_tag_to_course");
        Ok(())
    }

    async fn remove_tag_from_course(
        &self,
        _org_id: &str,
        _tag_id: &str,
        _course_id: &str,
    ) -> Result<(), AppError> {
        self.calls.bump("remove_tag_from_course");
        Ok(())
    }

    async fn list_invitations(&self, _org_id: &str) -> Result<Vec<Invitation>, AppError> {
        self.calls.bump("list_invitations");
        Ok(self.invitations.lock().unwrap().clone())
    }

    async fn create_invitation(
        &self,
        org_id: &str,
        req: &CreateInvitationRequest,
    ) -> Result<Invitation, AppError> {
        self.calls.bump("create_invitation");
        let mut invitations = self.invitations.lock().unwrap();
        let invitation = Invitation {
            id: format!("inv-{}", invitations.len() + 1),
            organization_id: org_id.to_string(),
            email: req.email.clone(),
            role: req.role,
            status: InvitationStatus::Pending,
            expires_at: Utc::now() + Duration::days(7),
            created_at: Utc::now(),
        };
        invitations.push(invitation.clone());
        Ok(invitation)
    }

    async fn cancel_invitation(
        &self,
        _org_id: &str,
        invitation_id: &str,
    ) -> Result<(), AppError> {
        self.calls.bump("cancel_invitation");
        self.invitations
            .lock()
            .unwrap()
            .retain(|i| i.id != invitation_id);
        Ok(())
    }

    async fn resend_invitation(
        &self,
        _org_id: &str,
        invitation_id: &str,
    ) -> Result<Invitation, AppError> {
        self.calls.bump("resend_invitation");
        let mut invitations = self.invitations.lock().unwrap();
        let invitation = invitations
            .iter_mut()
            .find(|i| i.id == invitation_id)
            .ok_or_else(|| AppError::NotFound(format!("invitation {}", invitation_id)))?;
        invitation.expires_at = Utc::now() + Duration::days(7);
        Ok(invitation.clone())
    }

    async fn get_organization_stats(&self, org_id: &str) -> Result<OrganizationStats, AppError> {
        self.calls.bump("get_organization_stats");
        let members = self.members.lock().unwrap();
        Ok(OrganizationStats {
            organization_id: org_id.to_string(),
            member_count: members.len() as u32,
            course_count: 0,
            completion_rate: 0,
            active_members: members.len() as u32,
        })
    }
}

// ---- course ----------------------------------------------------------

#[derive(Default)]
pub struct MockCourseGateway {
    /// Catalogs keyed by the scope's course cache key.
    pub catalogs: Mutex<HashMap<String, Vec<Course>>>,
    pub calls: CallLog,
}

impl MockCourseGateway {
    pub fn with_catalog(scope: &Scope, courses: Vec<Course>) -> Self {
        let gateway = Self::default();
        gateway.seed(scope, courses);
        gateway
    }

    pub fn seed(&self, scope: &Scope, courses: Vec<Course>) {
        self.catalogs
            .lock()
            .unwrap()
            .insert(scope.cache_key("courses"), courses);
    }

    fn catalog_key(scope: &Scope) -> String {
        scope.cache_key("courses")
    }
}

#[async_trait]
impl CourseGateway for MockCourseGateway {
    async fn list_courses(&self, scope: &Scope) -> Result<Vec<Course>, AppError> {
        self.calls.bump(&format!("list:{}", Self::catalog_key(scope)));
        Ok(self
            .catalogs
            .lock()
            .unwrap()
            .get(&Self::catalog_key(scope))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_course(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError> {
        self.calls.bump("get_course");
        self.catalogs
            .lock()
            .unwrap()
            .get(&Self::catalog_key(scope))
            .and_then(|courses| courses.iter().find(|c| c.id == course_id).cloned())
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))
    }

    async fn enroll(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError> {
        self.calls.bump("enroll");
        let mut catalogs = self.catalogs.lock().unwrap();
        let courses = catalogs
            .get_mut(&Self::catalog_key(scope))
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        course.enrolled_at = Some(Utc::now());
        Ok(course.clone())
    }

    async fn unenroll(&self, scope: &Scope, course_id: &str) -> Result<(), AppError> {
        self.calls.bump("unenroll");
        let mut catalogs = self.catalogs.lock().unwrap();
        if let Some(courses) = catalogs.get_mut(&Self::catalog_key(scope)) {
            if let Some(course) = courses.iter_mut().find(|c| c.id == course_id) {
                course.enrolled_at = None;
            }
        }
        Ok(())
    }

    async fn update_progress(
        &self,
        scope: &Scope,
        course_id: &str,
        update: &ProgressUpdate,
    ) -> Result<Course, AppError> {
        self.calls.bump("update_progress");
        let mut catalogs = self.catalogs.lock().unwrap();
        let courses = catalogs
            .get_mut(&Self::catalog_key(scope))
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        course.progress = update.progress;
        Ok(course.clone())
    }

    async fn complete_module(
        &self,
        scope: &Scope,
        course_id: &str,
        module_id: &str,
    ) -> Result<Course, AppError> {
        self.calls.bump("complete_module");
        let mut catalogs = self.catalogs.lock().unwrap();
        let courses = catalogs
            .get_mut(&Self::catalog_key(scope))
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == course_id)
            .ok_or_else(|| AppError::NotFound(format!("course {}", course_id)))?;
        if let Some(module) = course.modules.iter_mut().find(|m| m.id == module_id) {
            module.completed = true;
        }
        let completed = course.modules.iter().filter(|m| m.completed).count();
        if !course.modules.is_empty() {
            course.progress = (completed as f32 / course.modules.len() as f32) * 100.0;
        }
        Ok(course.clone())
    }

    async fn get_member_stats(
        &self,
        _org_id: &str,
        user_id: &str,
    ) -> Result<MemberStats, AppError> {
        self.calls.bump("get_member_stats");
        Ok(MemberStats {
            user_id: user_id.to_string(),
            total_courses: 2,
            completed_courses: 1,
            in_progress_courses: 1,
            average_progress: 75.0,
            last_activity: Some(Utc::now()),
        })
    }
}
