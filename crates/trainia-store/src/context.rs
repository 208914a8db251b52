//! Active scope resolution and persistence.
//!
//! The resolver holds the current [`Scope`] (personal account or one of the
//! user's organizations), persists every change through a [`ScopeStorage`],
//! and broadcasts changes so other parts of the running application
//! re-resolve without polling. Entity stores qualify every cache key with
//! the active scope, so a context switch redirects fetches to a different
//! cache partition without explicit clearing.

use std::path::PathBuf;
use std::sync::Mutex;

use tokio::sync::{broadcast, RwLock};

use trainia_core::models::Organization;
use trainia_core::{AppError, Scope};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Persistence for the active scope. The scope is stored as one small JSON
/// object under a single location; absence means personal.
pub trait ScopeStorage: Send + Sync {
    fn load(&self) -> Result<Option<Scope>, AppError>;
    fn save(&self, scope: &Scope) -> Result<(), AppError>;
}

/// File-backed scope storage (client-local persistent state).
pub struct FileScopeStorage {
    path: PathBuf,
}

impl FileScopeStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScopeStorage for FileScopeStorage {
    fn load(&self) -> Result<Option<Scope>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(scope) => Ok(Some(scope)),
            Err(err) => {
                // An unreadable scope file falls back to the default rather
                // than wedging startup.
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring corrupt scope file");
                Ok(None)
            }
        }
    }

    fn save(&self, scope: &Scope) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(scope)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory scope storage for tests and embedded use.
#[derive(Default)]
pub struct MemoryScopeStorage {
    slot: Mutex<Option<Scope>>,
}

impl ScopeStorage for MemoryScopeStorage {
    fn load(&self) -> Result<Option<Scope>, AppError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("scope storage poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, scope: &Scope) -> Result<(), AppError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("scope storage poisoned".to_string()))?;
        *slot = Some(scope.clone());
        Ok(())
    }
}

/// Resolver for the active scope.
pub struct ContextResolver {
    storage: Box<dyn ScopeStorage>,
    current: RwLock<Scope>,
    events: broadcast::Sender<Scope>,
}

impl ContextResolver {
    /// Restore the persisted scope, defaulting to the user's personal scope
    /// when nothing was persisted.
    pub fn new(storage: Box<dyn ScopeStorage>, user_id: &str) -> Result<Self, AppError> {
        let initial = storage
            .load()?
            .unwrap_or_else(|| Scope::personal(user_id));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            storage,
            current: RwLock::new(initial),
            events,
        })
    }

    pub async fn current(&self) -> Scope {
        self.current.read().await.clone()
    }

    /// Subscribe to scope changes.
    pub fn subscribe(&self) -> broadcast::Receiver<Scope> {
        self.events.subscribe()
    }

    /// Switch to the personal scope. Always succeeds.
    pub async fn switch_to_personal(&self, user_id: &str) -> Result<Scope, AppError> {
        let scope = Scope::personal(user_id);
        self.commit(scope).await
    }

    /// Switch to an organization scope. Rejected (state unchanged) when the
    /// organization is not in the caller's accessible list.
    pub async fn switch_to_organization(
        &self,
        org: &Organization,
        accessible: &[Organization],
    ) -> Result<Scope, AppError> {
        if !accessible.iter().any(|candidate| candidate.id == org.id) {
            return Err(AppError::Validation(format!(
                "Organization {} is not accessible to this user",
                org.id
            )));
        }
        let scope = Scope::Organization {
            id: org.id.clone(),
            name: org.name.clone(),
            container: org.container.clone(),
        };
        self.commit(scope).await
    }

    async fn commit(&self, scope: Scope) -> Result<Scope, AppError> {
        self.storage.save(&scope)?;
        {
            let mut current = self.current.write().await;
            *current = scope.clone();
        }
        tracing::info!(scope = %scope.owner_id(), personal = scope.is_personal(), "Scope changed");
        // No receivers is fine; future subscribers read `current` directly.
        let _ = self.events.send(scope.clone());
        Ok(scope)
    }
}
