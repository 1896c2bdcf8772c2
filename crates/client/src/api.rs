//! REST client for the job-status backend.
//!
//! Wraps the backend's `GET {prefix}{job_id}` endpoint using
//! [`reqwest`]. [`StatusApi::get_json`] is the generic fetch primitive:
//! one GET, resolved exactly once, with the HTTP status and body
//! decoding folded into a single [`FetchError`].

use jobwatch_core::{JobId, JobStatus};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;

/// HTTP client for a single job-status backend.
#[derive(Debug, Clone)]
pub struct StatusApi {
    client: reqwest::Client,
    base_url: String,
    check_prefix: String,
}

/// Body returned by the check endpoint on HTTP 200.
///
/// Only `status` is interpreted. It is optional here so that a missing
/// or `null` field can be told apart from a malformed body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// Location of the finished artifact, sent once the job is done.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Errors from the fetch layer.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with something other than 200.
    #[error("Error code: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 200 response whose body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code carried by the error, if the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

impl StatusApi {
    /// Build a client from configuration.
    ///
    /// Fails only if the underlying [`reqwest::Client`] cannot be
    /// constructed (e.g. TLS backend initialisation).
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for sharing one connection pool between checkers).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            check_prefix: config.check_prefix.clone(),
        }
    }

    /// Origin requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the check endpoint for `job_id`.
    ///
    /// Plain concatenation: the id is not escaped.
    pub fn check_url(&self, job_id: &JobId) -> String {
        format!("{}{}{}", self.base_url, self.check_prefix, job_id)
    }

    /// Fetch the raw status document for a job.
    pub async fn get_status(&self, job_id: &JobId) -> Result<StatusResponse, FetchError> {
        let url = self.check_url(job_id);
        tracing::debug!(job_id = %job_id, url = %url, "Checking job status");
        self.get_json(&url).await
    }

    /// Issue a single GET and decode the 200 body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_ok(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // ---- private helpers ----

    /// Only an exact 200 counts as success; every other status, 2xx
    /// included, becomes a [`FetchError::Status`].
    async fn ensure_ok(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
