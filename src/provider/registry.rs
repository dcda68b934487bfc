//! Resource Registry - Load resource definitions from JSON
//!
//! This module loads resource schema definitions from embedded JSON files
//! and provides lookup functions for the lifecycle handlers. A definition
//! names the REST collection path and the typed attribute schema the host
//! framework registers.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[include_str!("../resources/monitor.json")];

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    String,
    Int,
    Bool,
    ListString,
}

impl AttrType {
    /// Check that a JSON value matches this attribute type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            AttrType::String => value.is_string(),
            AttrType::Int => value.is_i64() || value.is_u64(),
            AttrType::Bool => value.is_boolean(),
            AttrType::ListString => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// Attribute definition from JSON
///
/// Flags follow the usual schema semantics: `required` and `optional`
/// attributes may appear in configuration; `computed` attributes may be
/// filled in by the server when absent. An attribute that is only
/// `computed` is read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct AttrDef {
    #[serde(rename = "type")]
    pub attr_type: AttrType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

impl AttrDef {
    /// Whether the attribute may appear in resource configuration
    pub fn configurable(&self) -> bool {
        self.required || self.optional
    }
}

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// REST collection path, e.g. `/api/v2/monitors`
    pub collection_path: String,
    pub attributes: HashMap<String, AttrDef>,
}

impl ResourceDef {
    /// Get an attribute definition by name
    pub fn attribute(&self, name: &str) -> Option<&AttrDef> {
        self.attributes.get(name)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by type name
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all registered resource type names
pub fn get_all_resource_keys() -> Vec<&'static str> {
    get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect()
}
