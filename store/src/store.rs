//! The resource store port.

use inlay_catalog::ResourceSet;
use inlay_core::{KeyDescriptor, PropertyBag, Resource};

use crate::StoreResult;

/// Create/update/fetch/relate operations against a backing store.
///
/// Calls are blocking and are never retried by the caller. Any atomicity
/// across several calls is the store's business; the bulk variants exist so
/// a store can apply a whole batch as one unit.
pub trait ResourceStore {
    /// Create one resource and return it as stored (keys filled in).
    fn create(&mut self, set: &ResourceSet, properties: PropertyBag) -> StoreResult<Resource>;

    /// Create a batch of resources, returned in input order.
    fn create_bulk(
        &mut self,
        set: &ResourceSet,
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>>;

    /// Fetch a resource by key.
    fn fetch(&self, set: &ResourceSet, key: &KeyDescriptor) -> StoreResult<Option<Resource>>;

    /// Apply property values to an existing resource.
    fn update(
        &mut self,
        set: &ResourceSet,
        existing: &Resource,
        key: &KeyDescriptor,
        properties: PropertyBag,
    ) -> StoreResult<Resource>;

    /// Apply property values to a batch of existing resources.
    ///
    /// `existing`, `keys` and `properties` are parallel slices.
    fn update_bulk(
        &mut self,
        set: &ResourceSet,
        existing: &[Resource],
        keys: &[KeyDescriptor],
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>>;

    /// Relate `target` to `source` through the navigation property `edge_name`.
    fn hook_relationship(
        &mut self,
        source_set: &ResourceSet,
        source: &Resource,
        target_set: &ResourceSet,
        target: &Resource,
        edge_name: &str,
    ) -> StoreResult<()>;
}
