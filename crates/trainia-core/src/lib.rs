//! Trainia Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! gateway traits shared across all Trainia client components.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::scope::Scope;
