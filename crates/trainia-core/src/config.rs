//! Configuration module
//!
//! Client configuration loaded from environment variables: API endpoint and
//! credentials, per-family cache TTLs, timeouts, and the runtime environment
//! flag that gates verbose diagnostics.

use std::env;
use std::time::Duration;

// Defaults
const DEFAULT_API_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const AGGREGATE_TIMEOUT_SECS: u64 = 10;
const CACHE_CAPACITY: usize = 256;

// Per-family TTLs. Volatile families (members, tags, invitations) refresh
// faster than user/organization profiles; course lists are the most stable.
const TTL_MEMBERS_SECS: u64 = 2 * 60;
const TTL_TAGS_SECS: u64 = 2 * 60;
const TTL_INVITATIONS_SECS: u64 = 2 * 60;
const TTL_USER_SECS: u64 = 5 * 60;
const TTL_ORGANIZATIONS_SECS: u64 = 5 * 60;
const TTL_COURSES_SECS: u64 = 10 * 60;

/// Cache TTLs per entity family.
#[derive(Clone, Debug)]
pub struct CacheTtls {
    pub user: Duration,
    pub organizations: Duration,
    pub members: Duration,
    pub tags: Duration,
    pub invitations: Duration,
    pub courses: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            user: Duration::from_secs(TTL_USER_SECS),
            organizations: Duration::from_secs(TTL_ORGANIZATIONS_SECS),
            members: Duration::from_secs(TTL_MEMBERS_SECS),
            tags: Duration::from_secs(TTL_TAGS_SECS),
            invitations: Duration::from_secs(TTL_INVITATIONS_SECS),
            courses: Duration::from_secs(TTL_COURSES_SECS),
        }
    }
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub environment: String,
    pub request_timeout: Duration,
    /// Wall-clock budget for aggregate refresh flows (batched parallel fetches).
    pub aggregate_timeout: Duration,
    pub cache_capacity: usize,
    pub ttls: CacheTtls,
    /// Path of the file holding the persisted active scope.
    pub scope_file: Option<String>,
}

impl ClientConfig {
    /// Check if the client is running against a production environment
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Whether verbose diagnostic payloads may be surfaced to end users.
    /// Development-only; production builds show normalized messages.
    pub fn debug_diagnostics(&self) -> bool {
        !self.is_production()
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for everything except credentials.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let api_url = env::var("TRAINIA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = env::var("TRAINIA_API_KEY").ok();
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let ttls = CacheTtls {
            user: env_duration_secs("TRAINIA_TTL_USER_SECS", TTL_USER_SECS)?,
            organizations: env_duration_secs(
                "TRAINIA_TTL_ORGANIZATIONS_SECS",
                TTL_ORGANIZATIONS_SECS,
            )?,
            members: env_duration_secs("TRAINIA_TTL_MEMBERS_SECS", TTL_MEMBERS_SECS)?,
            tags: env_duration_secs("TRAINIA_TTL_TAGS_SECS", TTL_TAGS_SECS)?,
            invitations: env_duration_secs("TRAINIA_TTL_INVITATIONS_SECS", TTL_INVITATIONS_SECS)?,
            courses: env_duration_secs("TRAINIA_TTL_COURSES_SECS", TTL_COURSES_SECS)?,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            environment,
            request_timeout: env_duration_secs(
                "TRAINIA_REQUEST_TIMEOUT_SECS",
                REQUEST_TIMEOUT_SECS,
            )?,
            aggregate_timeout: env_duration_secs(
                "TRAINIA_AGGREGATE_TIMEOUT_SECS",
                AGGREGATE_TIMEOUT_SECS,
            )?,
            cache_capacity: env_parse("TRAINIA_CACHE_CAPACITY", CACHE_CAPACITY)?,
            ttls,
            scope_file: env::var("TRAINIA_SCOPE_FILE").ok(),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            environment: "development".to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            aggregate_timeout: Duration::from_secs(AGGREGATE_TIMEOUT_SECS),
            cache_capacity: CACHE_CAPACITY,
            ttls: CacheTtls::default(),
            scope_file: None,
        }
    }
}

fn env_duration_secs(key: &str, default_secs: u64) -> Result<Duration, anyhow::Error> {
    Ok(Duration::from_secs(env_parse(key, default_secs)?))
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().map_err(|e| {
            tracing::warn!(key = %key, value = %raw, "Invalid configuration value");
            anyhow::anyhow!("Invalid value for {}: {}", key, e)
        }),
        Err(_) => Ok(default),
    }
}
