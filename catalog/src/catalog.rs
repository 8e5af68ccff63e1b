//! The Catalog - immutable metadata lookup.

use crate::{ResourceSet, ResourceType};
use std::collections::HashMap;
use std::sync::Arc;

/// Name resolution for resource sets and resource types.
///
/// The materializer only ever reads metadata through this trait, so any
/// metadata provider (static, reflected, remote) can stand behind it.
pub trait MetadataCatalog {
    /// Resolve a resource set by name.
    fn resolve_resource_set(&self, name: &str) -> Option<&ResourceSet>;

    /// Resolve a resource type by name.
    fn resolve_resource_type(&self, name: &str) -> Option<&ResourceType>;
}

/// The Catalog provides runtime lookup of resource sets and types.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Resource types by name.
    types: HashMap<String, Arc<ResourceType>>,
    /// Resource sets by name.
    sets: HashMap<String, ResourceSet>,
}

impl Catalog {
    /// Create a catalog (use CatalogBuilder for construction).
    pub(crate) fn new(
        types: HashMap<String, Arc<ResourceType>>,
        sets: HashMap<String, ResourceSet>,
    ) -> Self {
        Self { types, sets }
    }

    /// Get all resource sets.
    pub fn all_sets(&self) -> impl Iterator<Item = &ResourceSet> {
        self.sets.values()
    }

    /// Get the number of resource types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Get the number of resource sets.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }
}

impl MetadataCatalog for Catalog {
    fn resolve_resource_set(&self, name: &str) -> Option<&ResourceSet> {
        self.sets.get(name)
    }

    fn resolve_resource_type(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name).map(|t| t.as_ref())
    }
}
