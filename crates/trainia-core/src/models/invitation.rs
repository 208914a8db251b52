use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::organization::Role;

/// Invitation status as persisted by the server.
///
/// Expiry is a derived property: a PENDING invitation past its `expires_at`
/// is effectively expired even if the persisted status has not been updated.
/// Use [`Invitation::is_effectively_expired`] instead of reading the status
/// field directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

/// Invitation to join an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    pub role: Role,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Derived expiry: PENDING past the deadline counts as expired regardless
    /// of the persisted status.
    pub fn is_effectively_expired(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            InvitationStatus::Expired => true,
            InvitationStatus::Pending => now > self.expires_at,
            _ => false,
        }
    }
}

/// Invitation creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email)]
    pub email: String,
    pub role: Role,
}
