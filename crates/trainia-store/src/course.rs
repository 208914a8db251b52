//! Course store: the enrollable catalog under the active scope, plus
//! enrollment and progress actions.

use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use trainia_cache::TtlCache;
use trainia_core::gateway::CourseGateway;
use trainia_core::models::{Course, MemberStats, ProgressUpdate, Scope};
use trainia_core::AppError;

use crate::state::{CachedResource, StoreState};

pub struct CourseStore {
    gateway: Arc<dyn CourseGateway>,
    cache: Arc<TtlCache>,
    ttl: Duration,
    courses: CachedResource<Vec<Course>>,
}

impl CourseStore {
    pub fn new(gateway: Arc<dyn CourseGateway>, cache: Arc<TtlCache>, ttl: Duration) -> Self {
        Self {
            gateway,
            cache,
            ttl,
            courses: CachedResource::new(),
        }
    }

    pub async fn snapshot(&self) -> StoreState<Vec<Course>> {
        self.courses.snapshot().await
    }

    /// Fetch the course list for `scope`, cache-first unless `force`.
    /// Personal and organization scopes use disjoint cache partitions.
    pub async fn fetch(&self, scope: &Scope, force: bool) -> Result<Vec<Course>, AppError> {
        let gateway = self.gateway.clone();
        let scope_owned = scope.clone();
        self.courses
            .fetch(
                &self.cache,
                &scope.cache_key("courses"),
                self.ttl,
                force,
                || async move { gateway.list_courses(&scope_owned).await },
            )
            .await
    }

    /// Enroll in a course. The server's response (with the enrollment
    /// stamped) replaces the local entry.
    pub async fn enroll(&self, scope: &Scope, course_id: &str) -> Result<Course, AppError> {
        let course = self.gateway.enroll(scope, course_id).await?;
        self.invalidate_scope(scope).await;
        self.upsert(course.clone()).await;
        tracing::info!(course_id = %course_id, scope = %scope.owner_id(), "Enrolled");
        Ok(course)
    }

    /// Drop the enrollment. Local removal is unambiguous (filter by id).
    pub async fn unenroll(&self, scope: &Scope, course_id: &str) -> Result<(), AppError> {
        self.gateway.unenroll(scope, course_id).await?;
        self.invalidate_scope(scope).await;
        let course_id = course_id.to_string();
        self.courses
            .apply(|courses| courses.retain(|course| course.id != course_id))
            .await;
        Ok(())
    }

    /// Report progress for a course. Progress is monotonic: a value below
    /// the locally known progress is a no-op, mirroring how completion
    /// events can only move a course forward.
    pub async fn update_progress(
        &self,
        scope: &Scope,
        course_id: &str,
        progress: f32,
    ) -> Result<Course, AppError> {
        let update = ProgressUpdate { progress };
        if let Err(err) = update.validate() {
            let err = AppError::from(err);
            self.courses.record_error(&err).await;
            return Err(err);
        }

        if let Some(current) = self.find(course_id).await {
            if progress <= current.progress {
                tracing::debug!(
                    course_id = %course_id,
                    current = current.progress,
                    reported = progress,
                    "Ignoring non-advancing progress update"
                );
                return Ok(current);
            }
        }

        let course = self.gateway.update_progress(scope, course_id, &update).await?;
        self.invalidate_scope(scope).await;
        self.upsert(course.clone()).await;
        Ok(course)
    }

    /// Mark a module complete; the server recomputes course progress.
    pub async fn complete_module(
        &self,
        scope: &Scope,
        course_id: &str,
        module_id: &str,
    ) -> Result<Course, AppError> {
        let course = self
            .gateway
            .complete_module(scope, course_id, module_id)
            .await?;
        self.invalidate_scope(scope).await;
        self.upsert(course.clone()).await;
        tracing::info!(course_id = %course_id, module_id = %module_id, "Module completed");
        Ok(course)
    }

    /// Per-member training stats, read through the cache.
    pub async fn fetch_member_stats(
        &self,
        org_id: &str,
        user_id: &str,
        force: bool,
    ) -> Result<MemberStats, AppError> {
        let key = format!("stats:org:{}:member:{}", org_id, user_id);
        if force {
            self.cache.invalidate(&key).await;
        }
        let gateway = self.gateway.clone();
        let org_id = org_id.to_string();
        let user_id = user_id.to_string();
        self.cache
            .fetch_with(&key, self.ttl, || async move {
                gateway.get_member_stats(&org_id, &user_id).await
            })
            .await
    }

    async fn find(&self, course_id: &str) -> Option<Course> {
        self.courses
            .snapshot()
            .await
            .data
            .into_iter()
            .find(|course| course.id == course_id)
    }

    async fn upsert(&self, course: Course) {
        self.courses
            .apply(|courses| match courses.iter_mut().find(|c| c.id == course.id) {
                Some(existing) => *existing = course,
                None => courses.push(course),
            })
            .await;
    }

    async fn invalidate_scope(&self, scope: &Scope) {
        self.cache
            .invalidate_prefix(&scope.cache_key("courses"))
            .await;
    }
}
