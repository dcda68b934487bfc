//! Provider layer: resource schemas and lifecycle handlers
//!
//! Models the host framework's registration contract: a resource type with
//! a typed attribute schema plus lifecycle callbacks. The host owns plan
//! persistence and diff reporting; this layer owns the schema, the
//! attribute-level delta, and the CRUD calls.
//!
//! # Module Structure
//!
//! - [`registry`] - Resource definitions loaded from embedded JSON
//! - [`state`] - Instance state, config validation, plan computation
//! - [`lifecycle`] - Create/Read/Update/Delete/Import handlers

pub mod lifecycle;
pub mod registry;
pub mod state;

use crate::api::client::ApiClient;
use anyhow::Result;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://betteruptime.com";

/// Provider-level configuration
///
/// Passed explicitly into each client construction rather than held in a
/// shared singleton, so per-instance operations stay independent and
/// testable against a local mock server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer token for the API (required)
    pub api_token: String,
    /// API base URL, overridable for testing
    pub base_url: String,
}

impl ProviderConfig {
    /// Create a configuration with the default base URL
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build an API client from this configuration
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.base_url, &self.api_token)
    }
}
