use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tag entity. Belongs to exactly one organization; associated with members
/// and courses many-to-many on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    /// Display color, e.g. "#3B82F6".
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Tag creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 4, max = 9))]
    pub color: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}

/// Tag update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 4, max = 9))]
    pub color: Option<String>,
    #[validate(length(max = 200))]
    pub description: Option<String>,
}
