//! Live resources as returned by a resource store.

use std::fmt;

use crate::{PropertyBag, Value};

/// Store-assigned identity of a live resource.
///
/// Opaque to the engine; a store uses it to find the resource again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Create a new ResourceId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A live resource handle: a snapshot of a stored entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Store identity.
    pub id: ResourceId,
    /// Name of the resource set holding this resource.
    pub set_name: String,
    /// Version number, bumped on every property change.
    pub version: u64,
    /// Property values.
    pub properties: PropertyBag,
}

impl Resource {
    /// Create a new resource with the given properties.
    pub fn new(id: ResourceId, set_name: impl Into<String>, properties: PropertyBag) -> Self {
        Self {
            id,
            set_name: set_name.into(),
            version: 1,
            properties,
        }
    }

    /// Get a property value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Set a property value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
        self.version += 1;
    }

    /// Merge a bag of property values, bumping the version once.
    pub fn merge(&mut self, properties: PropertyBag) {
        if properties.is_empty() {
            return;
        }
        self.properties.extend(properties);
        self.version += 1;
    }
}
