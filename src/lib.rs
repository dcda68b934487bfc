//! Provider core for Better Uptime monitors
//!
//! Maps a typed attribute schema for the `betteruptime_monitor` resource
//! onto the REST API's monitor CRUD endpoints. The crate ships the pieces
//! a plugin host calls into: the resource registry, the lifecycle handlers
//! (Create, Read, Update, Delete, Import), and the API client they drive.
//!
//! ```ignore
//! use betteruptime_provider::provider::{lifecycle, registry, ProviderConfig};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let config = ProviderConfig::new("api-token");
//!     let client = config.client()?;
//!     let def = registry::get_resource("betteruptime_monitor").unwrap();
//!
//!     let desired = serde_json::json!({
//!         "url": "http://example.com",
//!         "monitor_type": "status",
//!     });
//!     let state = lifecycle::create(&client, def, desired.as_object().unwrap()).await?;
//!     println!("created monitor {}", state.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod provider;

pub use api::client::ApiClient;
pub use api::error::ApiError;
pub use provider::ProviderConfig;
