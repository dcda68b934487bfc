//! Better Uptime API interaction module
//!
//! This module provides the core functionality for talking to the Better
//! Uptime REST API: the HTTP layer, the error taxonomy, and the client
//! used by the resource lifecycle handlers.
//!
//! # Module Structure
//!
//! - [`client`] - Main API client for monitor CRUD calls
//! - [`error`] - Error taxonomy for API calls
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use crate::api::client::ApiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("https://betteruptime.com", "token")?;
//!     let monitor = client.get("/api/v2/monitors", "123456").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
