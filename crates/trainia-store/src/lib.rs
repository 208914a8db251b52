//! Observable entity stores for the Trainia client.
//!
//! Each store holds the last-known server state for one entity family, reads
//! through the shared TTL cache, and exposes mutator actions that invalidate
//! the family's cache partition and optimistically patch local state. Stores
//! receive their gateway and cache as injected dependencies; there are no
//! ambient singletons.
//!
//! Errors never cross the store boundary as panics: every action returns
//! `Result<_, AppError>` and records the error in the store's snapshot state
//! so view bindings can render it reactively.

pub mod context;
pub mod course;
pub mod organization;
pub mod state;
pub mod user;

pub use context::{ContextResolver, FileScopeStorage, MemoryScopeStorage, ScopeStorage};
pub use course::CourseStore;
pub use organization::OrganizationStore;
pub use state::{CachedResource, StoreState};
pub use user::UserStore;
