//! Error taxonomy for Better Uptime API calls
//!
//! Distinguishes the outcomes the lifecycle handlers care about: a 404 on
//! read means the remote monitor is gone and must not be reported as a
//! failure, while authorization and validation errors are fatal to the
//! current operation.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/DNS/TLS failure before a response was received
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401 or 403 - the bearer token was rejected
    #[error("authorization failed: {status} - {body}")]
    Unauthorized { status: StatusCode, body: String },

    /// 404 - the resource does not exist remotely
    #[error("resource not found")]
    NotFound,

    /// Any other non-2xx response
    #[error("API request failed: {status} - {body}")]
    Remote { status: StatusCode, body: String },

    /// Response body was not the JSON we expected
    #[error("failed to parse response JSON: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Response JSON parsed but the envelope shape was wrong
    #[error("unexpected response envelope: {0}")]
    Envelope(String),
}

impl ApiError {
    /// True when the error means the resource is absent remotely
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}
