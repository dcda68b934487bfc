//! Better Uptime API client
//!
//! Main client for the monitors REST API, combining the HTTP layer with
//! base URL and bearer token configuration. One client instance carries no
//! mutable state, so handler invocations for independent resource
//! instances can share it freely.

use super::error::ApiError;
use super::http::HttpClient;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

/// Response envelope used by the API: `{"data":{"id":..,"attributes":{..}}}`
#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    id: Value,
    #[serde(default)]
    attributes: Map<String, Value>,
}

/// One remote resource as returned by the API
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource {
    pub id: String,
    pub attributes: Map<String, Value>,
}

/// Main Better Uptime API client
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    token: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL and bearer token
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        let http = HttpClient::new().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
        })
    }

    /// Build a collection URL, e.g. `<base>/api/v2/monitors`
    pub fn collection_url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Build a single-resource URL, e.g. `<base>/api/v2/monitors/123`
    pub fn resource_url(&self, path: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(path), id)
    }

    /// Create a resource: POST to the collection, expect the envelope back
    pub async fn create(&self, path: &str, payload: &Value) -> Result<RemoteResource, ApiError> {
        let response = self
            .http
            .post(&self.collection_url(path), &self.token, Some(payload))
            .await?;
        parse_envelope(response)
    }

    /// Fetch a resource by id; a 404 surfaces as [`ApiError::NotFound`]
    pub async fn get(&self, path: &str, id: &str) -> Result<RemoteResource, ApiError> {
        let response = self
            .http
            .get(&self.resource_url(path, id), &self.token)
            .await?;
        parse_envelope(response)
    }

    /// Update a resource: PATCH with only the changed fields; the server
    /// merges the delta with what it already stores
    pub async fn update(&self, path: &str, id: &str, delta: &Value) -> Result<RemoteResource, ApiError> {
        let response = self
            .http
            .patch(&self.resource_url(path, id), &self.token, Some(delta))
            .await?;
        parse_envelope(response)
    }

    /// Delete a resource by id; the API responds 204 with an empty body
    pub async fn delete(&self, path: &str, id: &str) -> Result<(), ApiError> {
        self.http
            .delete(&self.resource_url(path, id), &self.token)
            .await?;
        Ok(())
    }
}

/// Parse the `{"data":{...}}` envelope into a [`RemoteResource`]
fn parse_envelope(response: Value) -> Result<RemoteResource, ApiError> {
    let envelope: Envelope = serde_json::from_value(response)?;

    // The API serializes ids as JSON strings, but be tolerant of numbers.
    let id = match envelope.data.id {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => {
            return Err(ApiError::Envelope(format!(
                "resource id is neither string nor number: {other}"
            )))
        }
    };

    Ok(RemoteResource {
        id,
        attributes: envelope.data.attributes,
    })
}
