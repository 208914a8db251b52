//! Domain models shared across the Trainia client.
//!
//! All identifiers are opaque strings assigned by the server; the client never
//! interprets their structure.

pub mod course;
pub mod invitation;
pub mod organization;
pub mod scope;
pub mod stats;
pub mod tag;
pub mod user;

pub use course::{Course, CourseModule, CourseSource, ProgressUpdate};
pub use invitation::{CreateInvitationRequest, Invitation, InvitationStatus};
pub use organization::{
    CreateOrganizationRequest, Member, Organization, Role, UpdateOrganizationRequest,
};
pub use scope::Scope;
pub use stats::{MemberStats, OrganizationStats};
pub use tag::{CreateTagRequest, Tag, UpdateTagRequest};
pub use user::{User, UserUpdate};
