//! User endpoints.

use async_trait::async_trait;

use trainia_core::gateway::UserGateway;
use trainia_core::models::{User, UserUpdate};
use trainia_core::AppError;

use crate::{api_prefix, encode_id, ApiClient};

#[async_trait]
impl UserGateway for ApiClient {
    async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        self.get_field(
            &format!("{}/users/{}", api_prefix(), encode_id(user_id)),
            &[],
            "user",
        )
        .await
    }

    async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, AppError> {
        self.put_field(
            &format!("{}/users/{}", api_prefix(), encode_id(user_id)),
            update,
            "user",
        )
        .await
    }

    async fn delete_account(&self, user_id: &str) -> Result<(), AppError> {
        self.delete_ok(&format!("{}/users/{}", api_prefix(), encode_id(user_id)))
            .await
    }
}
