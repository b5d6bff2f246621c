//! Typed REST client for the library backend.
//!
//! The backend is the system of record. Every mutation here can race with
//! another staff member's action (two desks lending the last copy at the
//! same moment), so non-success responses are decoded and surfaced as
//! rejections rather than retried or papered over.

pub mod books;
pub mod loans;
pub mod settings;
pub mod students;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::domain::ClientError;

const USER_AGENT: &str = concat!("circdesk/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct LibraryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LibraryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Validation(format!("invalid base URL '{}': {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a path onto the base URL. The base usually carries an `/api`
    /// prefix, so this concatenates instead of using `Url::join`, which
    /// would drop the prefix for absolute paths.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let full = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&full).map_err(|e| ClientError::Validation(format!("bad endpoint '{}': {}", full, e)))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;
        decode_response(response, &url).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self.http.post(url.clone()).json(body).send().await?;
        decode_response(response, &url).await
    }

    pub(crate) async fn put_json_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!("PUT {}", url);
        let response = self.http.put(url.clone()).json(body).send().await?;
        check_status(response, &url).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &Url,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(rejection(status.as_u16(), &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| ClientError::Decode(format!("{} from {}", e, url)))
}

async fn check_status(response: reqwest::Response, _url: &Url) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(rejection(status.as_u16(), &body))
}

/// The backend reports business failures as `{ "message": ... }` or
/// `{ "error": ... }`; fall back to the raw body, then the bare status.
fn rejection(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}", status));

    ClientError::Rejected { status, message }
}
