//! HTTP client for the Trainia API.
//!
//! Provides a stateless client with configurable auth (Bearer token or
//! X-API-Key), generic helpers that unwrap the server's response envelope,
//! and one typed method per remote operation (implementing the gateway
//! traits from `trainia-core`). Performs no caching and no state mutation.
//!
//! The server wraps every payload in an envelope
//! `{ <entityField>: <payload>, error?: string, success?: boolean }`;
//! business failures are signaled by the `error`/`success` fields rather
//! than HTTP status alone, so both are checked here and normalized into
//! [`AppError`].

mod courses;
mod organizations;
mod users;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use trainia_core::{AppError, ClientConfig};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// API version prefix (e.g. "/api/v1"). Set TRAINIA_API_VERSION to match the
/// server.
pub fn api_prefix() -> String {
    let version = std::env::var("TRAINIA_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the Trainia API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Option<Auth>,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Option<Auth>) -> Result<Self, AppError> {
        Self::with_timeout(base_url, auth, Duration::from_secs(60))
    }

    pub fn with_timeout(
        base_url: String,
        auth: Option<Auth>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create a client from [`ClientConfig`] (API key auth when a key is
    /// configured).
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let auth = config.api_key.clone().map(Auth::XApiKey);
        Self::with_timeout(config.api_url.clone(), auth, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(Auth::Bearer(token)) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    /// Perform one round trip and return the parsed envelope body.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, AppError> {
        let url = self.build_url(path);
        let request_id = uuid::Uuid::new_v4();

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("X-Request-Id", request_id.to_string());
        request = self.apply_auth(request);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path = %path, request_id = %request_id, "API request");

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        let value: Option<serde_json::Value> = if text.is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        if !status.is_success() {
            // Prefer the envelope's message over the raw status when present.
            if let Some(ref value) = value {
                check_envelope(value)?;
            }
            if status == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(format!("{} not found", path)));
            }
            return Err(AppError::Transport(format!(
                "API request failed with status {}",
                status
            )));
        }

        let value = value.unwrap_or(serde_json::Value::Null);
        check_envelope(&value)?;
        Ok(value)
    }

    /// GET and extract the named payload field from the envelope.
    pub async fn get_field<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        field: &str,
    ) -> Result<T, AppError> {
        let value = self.request(Method::GET, path, query, None).await?;
        extract_field(value, field)
    }

    /// POST a JSON body and extract the named payload field.
    pub async fn post_field<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        field: &str,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::POST, path, &[], Some(&body)).await?;
        extract_field(value, field)
    }

    /// PUT a JSON body and extract the named payload field.
    pub async fn put_field<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        field: &str,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::PUT, path, &[], Some(&body)).await?;
        extract_field(value, field)
    }

    /// POST with an empty body, checking only the envelope.
    pub async fn post_ok(&self, path: &str) -> Result<(), AppError> {
        self.request(Method::POST, path, &[], None).await?;
        Ok(())
    }

    /// POST with an empty body and extract the named payload field.
    pub async fn post_empty_field<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
    ) -> Result<T, AppError> {
        let value = self.request(Method::POST, path, &[], None).await?;
        extract_field(value, field)
    }

    /// DELETE, checking only the envelope.
    pub async fn delete_ok(&self, path: &str) -> Result<(), AppError> {
        self.request(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout(err.to_string())
    } else {
        AppError::Transport(err.to_string())
    }
}

/// Percent-encode an id for use in a path segment.
pub(crate) fn encode_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Reject envelopes signaling a business failure (`error` present or
/// `success == false`).
fn check_envelope(value: &serde_json::Value) -> Result<(), AppError> {
    if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
        let code = value
            .get("code")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        return Err(AppError::Api {
            message: message.to_string(),
            code,
        });
    }
    if value.get("success").and_then(|v| v.as_bool()) == Some(false) {
        return Err(AppError::Api {
            message: "Request failed".to_string(),
            code: None,
        });
    }
    Ok(())
}

/// Pull the named payload field out of a checked envelope and deserialize it.
fn extract_field<T: DeserializeOwned>(
    mut value: serde_json::Value,
    field: &str,
) -> Result<T, AppError> {
    let payload = value
        .get_mut(field)
        .map(serde_json::Value::take)
        .ok_or_else(|| AppError::Deserialize(format!("Missing field `{}` in response", field)))?;
    serde_json::from_value(payload).map_err(AppError::from)
}
