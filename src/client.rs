//! Blocking HTTP client for the backend browse service
//!
//! The backend lists filtered items (`get_directory_structure`), resolves a
//! user-entered logical reference to a canonical path (`get_file_info`) and
//! serves raw thumbnail payloads (`get_thumbnail`). All calls block, so they
//! are only ever issued from the refresh worker thread, never from the UI
//! thread.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

/// Errors from the backend client, by failure class
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connect, I/O, protocol)
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// Non-success status; carries the backend's structured error message
    /// when the body parses as `{"error": ...}`
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response arrived but its shape does not match the expected document
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct ListingRequest<'a> {
    path: &'a str,
    filter: &'a str,
}

#[derive(Debug, Serialize)]
struct FileInfoRequest<'a> {
    relative_path: &'a str,
}

#[derive(Debug, Serialize)]
struct ThumbnailRequest<'a> {
    path: &'a str,
    file: &'a str,
}

#[derive(Debug, Deserialize)]
struct FileInfoResponse {
    full_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Listing document; exactly one of the payload fields is populated,
/// depending on the browser variant the backend serves
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Client for one backend route prefix (e.g. `/browse/csv`)
#[derive(Debug, Clone)]
pub struct BackendClient {
    agent: Agent,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given route prefix, e.g.
    /// `http://127.0.0.1:8188/browse/csv`
    pub fn new(base_url: impl Into<String>) -> Self {
        // Non-2xx is handled as data, not as a transport error, so the
        // structured error body stays readable.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(10)))
            .build();
        Self {
            agent: config.new_agent(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Read the `{error}` body of a failed response, falling back to a
    /// generic message when the body is not the structured shape.
    fn status_error(mut response: ureq::http::Response<ureq::Body>) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .body_mut()
            .read_json::<ErrorBody>()
            .map(|b| b.error)
            .unwrap_or_else(|_| "unknown server error".to_string());
        ClientError::Status { status, message }
    }

    /// Resolve a user-entered logical reference to a canonical path.
    /// `Ok(None)` means the backend knows no such entry.
    pub fn get_file_info(&self, relative_path: &str) -> Result<Option<String>, ClientError> {
        let mut response = self
            .agent
            .post(&self.url("get_file_info"))
            .send_json(FileInfoRequest { relative_path })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response));
        }

        let info: FileInfoResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Malformed(e.to_string()))?;
        Ok(info.full_path)
    }

    /// Fetch the filtered item listing for a resolved source path
    pub fn get_directory_structure(
        &self,
        path: &str,
        filter: &str,
    ) -> Result<ListingResponse, ClientError> {
        let mut response = self
            .agent
            .post(&self.url("get_directory_structure"))
            .send_json(ListingRequest { path, filter })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response));
        }

        response
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Malformed(e.to_string()))
    }

    /// Fetch one raw thumbnail payload (encoded image bytes)
    pub fn get_thumbnail(&self, path: &str, file: &str) -> Result<Vec<u8>, ClientError> {
        let mut response = self
            .agent
            .post(&self.url("get_thumbnail"))
            .send_json(ThumbnailRequest { path, file })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response));
        }

        response
            .body_mut()
            .read_to_vec()
            .map_err(ClientError::Transport)
    }
}
