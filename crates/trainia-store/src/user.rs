//! User store: the authenticated user's profile.

use std::sync::Arc;
use std::time::Duration;

use validator::Validate;

use trainia_cache::TtlCache;
use trainia_core::gateway::UserGateway;
use trainia_core::models::{User, UserUpdate};
use trainia_core::AppError;

use crate::state::{CachedResource, StoreState};

fn user_key(user_id: &str) -> String {
    format!("user:personal:{}", user_id)
}

pub struct UserStore {
    gateway: Arc<dyn UserGateway>,
    cache: Arc<TtlCache>,
    ttl: Duration,
    profile: CachedResource<Option<User>>,
}

impl UserStore {
    pub fn new(gateway: Arc<dyn UserGateway>, cache: Arc<TtlCache>, ttl: Duration) -> Self {
        Self {
            gateway,
            cache,
            ttl,
            profile: CachedResource::new(),
        }
    }

    pub async fn snapshot(&self) -> StoreState<Option<User>> {
        self.profile.snapshot().await
    }

    /// Fetch the user's profile, cache-first unless `force`.
    pub async fn fetch(&self, user_id: &str, force: bool) -> Result<Option<User>, AppError> {
        let gateway = self.gateway.clone();
        let user_id_owned = user_id.to_string();
        self.profile
            .fetch(&self.cache, &user_key(user_id), self.ttl, force, || async move {
                gateway.get_user(&user_id_owned).await.map(Some)
            })
            .await
    }

    /// Update the profile and eagerly replace local state with the server's
    /// response.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &UserUpdate,
    ) -> Result<User, AppError> {
        if let Err(err) = update.validate() {
            let err = AppError::from(err);
            self.profile.record_error(&err).await;
            return Err(err);
        }

        let user = self.gateway.update_user(user_id, update).await?;
        self.cache.invalidate_prefix("user:").await;
        self.profile
            .apply(|profile| *profile = Some(user.clone()))
            .await;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    /// Delete the account remotely, then clear every cache entry and reset
    /// store state. The shared cache is wiped wholesale: nothing cached under
    /// any scope survives account deletion.
    pub async fn delete_account(&self, user_id: &str) -> Result<(), AppError> {
        self.gateway.delete_account(user_id).await?;
        self.cache.clear().await;
        self.profile.reset().await;
        tracing::info!(user_id = %user_id, "Account deleted, local state cleared");
        Ok(())
    }
}
