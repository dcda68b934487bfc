//! Instance state, config validation, and plan computation
//!
//! A resource instance is either absent or present; when present it is a
//! remote id plus a flat attribute map mirroring what the server stores.
//! The plan step compares desired configuration against current state and
//! yields the minimal attribute delta the handlers send over the wire.

use super::registry::{AttrType, ResourceDef};
use anyhow::{bail, Result};
use serde_json::{Map, Value};

/// Flat attribute map, keyed by remote attribute name
pub type AttrMap = Map<String, Value>;

/// State of one present resource instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceState {
    /// Remote-assigned identifier, set on create
    pub id: String,
    pub attributes: AttrMap,
}

impl InstanceState {
    pub fn new(id: impl Into<String>, attributes: AttrMap) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Get an attribute value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Merge returned attributes into state, overwriting existing keys.
    /// Keys the server did not return are left untouched.
    pub fn merge_attributes(&mut self, attributes: &AttrMap) {
        for (name, value) in attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
    }
}

/// Set of attribute changes to send to the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    pub changes: AttrMap,
}

impl Diff {
    /// True when desired configuration matches current state
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Validate desired configuration against the resource schema
///
/// Rejects unknown attributes, read-only (computed-only) attributes,
/// missing required attributes, and type mismatches.
pub fn validate_config(def: &ResourceDef, config: &AttrMap) -> Result<()> {
    for (name, value) in config {
        let Some(attr) = def.attribute(name) else {
            bail!("Unknown attribute {:?} for {}", name, def.display_name);
        };
        if !attr.configurable() {
            bail!(
                "Attribute {:?} is read-only for {}",
                name,
                def.display_name
            );
        }
        if !attr.attr_type.matches(value) {
            bail!(
                "Attribute {:?} has wrong type, expected {}",
                name,
                type_name(attr.attr_type)
            );
        }
    }

    for (name, attr) in &def.attributes {
        if attr.required && !config.contains_key(name) {
            bail!(
                "Missing required attribute {:?} for {}",
                name,
                def.display_name
            );
        }
    }

    Ok(())
}

fn type_name(attr_type: AttrType) -> &'static str {
    match attr_type {
        AttrType::String => "string",
        AttrType::Int => "int",
        AttrType::Bool => "bool",
        AttrType::ListString => "list of string",
    }
}

/// Desired configuration with schema defaults applied
///
/// Optional attributes left unset fall back to their declared default.
/// Attributes without a default (notably computed ones) stay absent, which
/// keeps server-assigned values out of every delta.
pub fn effective_config(def: &ResourceDef, config: &AttrMap) -> AttrMap {
    let mut effective = config.clone();

    for (name, attr) in &def.attributes {
        if effective.contains_key(name) {
            continue;
        }
        if let Some(default) = &attr.default {
            effective.insert(name.clone(), default.clone());
        }
    }

    effective
}

/// Compute the attribute delta between desired configuration and state
///
/// With no prior state (create) the delta is the full effective
/// configuration. With prior state (update) it contains exactly the
/// effective attributes whose value differs from what the state holds, so
/// re-planning an unchanged configuration yields an empty diff.
pub fn plan(def: &ResourceDef, prior: Option<&InstanceState>, config: &AttrMap) -> Result<Diff> {
    validate_config(def, config)?;
    let desired = effective_config(def, config);

    let changes = match prior {
        None => desired,
        Some(state) => desired
            .into_iter()
            .filter(|(name, value)| match state.get(name) {
                Some(current) => !values_match(current, value),
                None => true,
            })
            .collect(),
    };

    Ok(Diff { changes })
}

/// Attribute equality with numeric equivalence: the server may echo an
/// integer back in float notation (180 vs 180.0), which must not read as
/// a change.
fn values_match(current: &Value, desired: &Value) -> bool {
    if let (Some(current), Some(desired)) = (current.as_f64(), desired.as_f64()) {
        return current == desired;
    }
    current == desired
}
