//! A store double that records every call before delegating.

use inlay_catalog::ResourceSet;
use inlay_core::{KeyDescriptor, PropertyBag, Resource};
use inlay_store::{InMemoryStore, ResourceStore, StoreError, StoreResult};
use std::cell::RefCell;

/// One recorded store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create {
        set: String,
        properties: PropertyBag,
    },
    CreateBulk {
        set: String,
        properties: Vec<PropertyBag>,
    },
    Fetch {
        set: String,
        key: KeyDescriptor,
    },
    Update {
        set: String,
        key: KeyDescriptor,
        properties: PropertyBag,
    },
    UpdateBulk {
        set: String,
        keys: Vec<KeyDescriptor>,
        properties: Vec<PropertyBag>,
    },
    Hook {
        source_set: String,
        target_set: String,
        edge: String,
    },
}

impl StoreCall {
    /// Operation name as used by [`RecordingStore::fail_on`].
    pub fn name(&self) -> &'static str {
        match self {
            StoreCall::Create { .. } => "create",
            StoreCall::CreateBulk { .. } => "create_bulk",
            StoreCall::Fetch { .. } => "fetch",
            StoreCall::Update { .. } => "update",
            StoreCall::UpdateBulk { .. } => "update_bulk",
            StoreCall::Hook { .. } => "hook",
        }
    }
}

/// Wraps an [`InMemoryStore`] and logs every call made through it.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    calls: RefCell<Vec<StoreCall>>,
    fail_on: Option<&'static str>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of the named operation fail with a backend error.
    pub fn fail_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// The wrapped store.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Seed a resource without recording the call.
    pub fn seed(&mut self, set: &ResourceSet, properties: PropertyBag) -> StoreResult<Resource> {
        self.inner.create(set, properties)
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Names of all calls recorded so far, in order.
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(StoreCall::name).collect()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: StoreCall) -> StoreResult<()> {
        let name = call.name();
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(name) {
            return Err(StoreError::backend(format!("injected {} failure", name)));
        }
        Ok(())
    }
}

impl ResourceStore for RecordingStore {
    fn create(&mut self, set: &ResourceSet, properties: PropertyBag) -> StoreResult<Resource> {
        self.record(StoreCall::Create {
            set: set.name.clone(),
            properties: properties.clone(),
        })?;
        self.inner.create(set, properties)
    }

    fn create_bulk(
        &mut self,
        set: &ResourceSet,
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>> {
        self.record(StoreCall::CreateBulk {
            set: set.name.clone(),
            properties: properties.clone(),
        })?;
        self.inner.create_bulk(set, properties)
    }

    fn fetch(&self, set: &ResourceSet, key: &KeyDescriptor) -> StoreResult<Option<Resource>> {
        self.record(StoreCall::Fetch {
            set: set.name.clone(),
            key: key.clone(),
        })?;
        self.inner.fetch(set, key)
    }

    fn update(
        &mut self,
        set: &ResourceSet,
        existing: &Resource,
        key: &KeyDescriptor,
        properties: PropertyBag,
    ) -> StoreResult<Resource> {
        self.record(StoreCall::Update {
            set: set.name.clone(),
            key: key.clone(),
            properties: properties.clone(),
        })?;
        self.inner.update(set, existing, key, properties)
    }

    fn update_bulk(
        &mut self,
        set: &ResourceSet,
        existing: &[Resource],
        keys: &[KeyDescriptor],
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>> {
        self.record(StoreCall::UpdateBulk {
            set: set.name.clone(),
            keys: keys.to_vec(),
            properties: properties.clone(),
        })?;
        self.inner.update_bulk(set, existing, keys, properties)
    }

    fn hook_relationship(
        &mut self,
        source_set: &ResourceSet,
        source: &Resource,
        target_set: &ResourceSet,
        target: &Resource,
        edge_name: &str,
    ) -> StoreResult<()> {
        self.record(StoreCall::Hook {
            source_set: source_set.name.clone(),
            target_set: target_set.name.clone(),
            edge: edge_name.to_string(),
        })?;
        self.inner
            .hook_relationship(source_set, source, target_set, target, edge_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::catalog;
    use inlay_catalog::MetadataCatalog;
    use inlay_core::props;

    #[test]
    fn test_records_in_order() {
        let catalog = catalog();
        let widgets = catalog.resolve_resource_set("Widgets").unwrap();
        let mut store = RecordingStore::new();

        let created = store.create(widgets, props! { "name" => "Cog" }).unwrap();
        let key = KeyDescriptor::parse("1", "Widget", &widgets.resource_type().key_kinds()).unwrap();
        let fetched = store.fetch(widgets, &key).unwrap();

        assert_eq!(fetched, Some(created));
        assert_eq!(store.call_names(), vec!["create", "fetch"]);
    }

    #[test]
    fn test_injected_failure() {
        let catalog = catalog();
        let widgets = catalog.resolve_resource_set("Widgets").unwrap();
        let mut store = RecordingStore::new().fail_on("create");

        let err = store.create(widgets, props!()).unwrap_err();

        assert!(matches!(err, StoreError::Backend { .. }));
        assert_eq!(store.inner().len("Widgets"), 0);
    }
}
