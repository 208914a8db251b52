use serde::{Deserialize, Serialize};

/// The active viewpoint qualifying every fetch and every cache key: the
/// user's personal account or one of their organizations.
///
/// Persisted as a small JSON object under a single key in client-local
/// storage; absence defaults to personal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Scope {
    Personal {
        #[serde(rename = "id")]
        user_id: String,
    },
    Organization {
        id: String,
        name: String,
        /// Storage scope identifier of the organization.
        container: String,
    },
}

impl Scope {
    pub fn personal(user_id: impl Into<String>) -> Self {
        Scope::Personal {
            user_id: user_id.into(),
        }
    }

    pub fn is_personal(&self) -> bool {
        matches!(self, Scope::Personal { .. })
    }

    /// Identity of the scope owner (user id or organization id).
    pub fn owner_id(&self) -> &str {
        match self {
            Scope::Personal { user_id } => user_id,
            Scope::Organization { id, .. } => id,
        }
    }

    /// Storage container the scope's content lives under, when known.
    pub fn container(&self) -> Option<&str> {
        match self {
            Scope::Personal { .. } => None,
            Scope::Organization { container, .. } => Some(container),
        }
    }

    /// Cache key partition for an entity family under this scope.
    ///
    /// Personal and organization partitions are disjoint, so switching scope
    /// redirects fetches without any explicit cache clearing.
    pub fn cache_key(&self, family: &str) -> String {
        match self {
            Scope::Personal { user_id } => format!("{}:personal:{}", family, user_id),
            Scope::Organization { id, .. } => format!("{}:org:{}", family, id),
        }
    }
}
