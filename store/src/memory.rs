//! In-memory resource store.

use indexmap::IndexMap;
use inlay_catalog::{ResourceSet, ResourceType};
use inlay_core::{KeyDescriptor, PrimitiveKind, PropertyBag, Resource, ResourceId, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::{ResourceStore, StoreError, StoreResult};

/// ID allocator for resources.
#[derive(Debug)]
struct IdAllocator {
    next_resource_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_resource_id: 1 }
    }

    fn alloc_resource_id(&mut self) -> ResourceId {
        let id = ResourceId::new(self.next_resource_id);
        self.next_resource_id += 1;
        id
    }
}

/// Reference store keeping every resource set in memory.
///
/// Integer key properties left empty on create are assigned from a per-set
/// counter. Bulk operations are all-or-nothing.
#[derive(Debug)]
pub struct InMemoryStore {
    /// Resources per set, in creation order.
    resources: HashMap<String, IndexMap<ResourceId, Resource>>,
    /// Navigation links: (source, navigation name) to targets.
    links: HashMap<(ResourceId, String), Vec<ResourceId>>,
    /// Next auto-assigned integer key per set.
    next_keys: HashMap<String, i64>,
    /// ID allocator
    id_alloc: IdAllocator,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
            links: HashMap::new(),
            next_keys: HashMap::new(),
            id_alloc: IdAllocator::new(),
        }
    }

    /// Get a resource by set name and ID.
    pub fn get(&self, set_name: &str, id: ResourceId) -> Option<&Resource> {
        self.resources.get(set_name).and_then(|bucket| bucket.get(&id))
    }

    /// All resources of a set, in creation order.
    pub fn resources(&self, set_name: &str) -> impl Iterator<Item = &Resource> + '_ {
        self.resources
            .get(set_name)
            .into_iter()
            .flat_map(|bucket| bucket.values())
    }

    /// Number of resources in a set.
    pub fn len(&self, set_name: &str) -> usize {
        self.resources.get(set_name).map(|b| b.len()).unwrap_or(0)
    }

    /// Returns true if no set holds any resource.
    pub fn is_empty(&self) -> bool {
        self.resources.values().all(|b| b.is_empty())
    }

    /// Targets linked from `source` through navigation `name`.
    pub fn linked(&self, source: ResourceId, name: &str) -> &[ResourceId] {
        self.links
            .get(&(source, name.to_string()))
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }

    fn next_key(&mut self, set_name: &str) -> i64 {
        let slot = self.next_keys.entry(set_name.to_string()).or_insert(1);
        let key = *slot;
        *slot += 1;
        key
    }

    /// Keep the counter ahead of explicitly supplied integer keys.
    fn observe_key(&mut self, set_name: &str, value: i64) {
        let slot = self.next_keys.entry(set_name.to_string()).or_insert(1);
        if value >= *slot {
            *slot = value + 1;
        }
    }

    fn remove_all(&mut self, set_name: &str, ids: impl Iterator<Item = ResourceId>) {
        if let Some(bucket) = self.resources.get_mut(set_name) {
            for id in ids {
                bucket.shift_remove(&id);
            }
        }
    }

    fn restore_all(&mut self, set_name: &str, snapshots: Vec<Resource>) {
        if let Some(bucket) = self.resources.get_mut(set_name) {
            for snapshot in snapshots {
                if let Some(slot) = bucket.get_mut(&snapshot.id) {
                    *slot = snapshot;
                }
            }
        }
    }
}

/// Canonical key literals of a resource, in declared key order.
fn key_literals(ty: &ResourceType, resource: &Resource) -> StoreResult<Vec<String>> {
    ty.key_kinds()
        .into_iter()
        .map(|(name, kind)| ty.key_literal(resource, name, kind).map_err(StoreError::from))
        .collect()
}

fn matches_key(ty: &ResourceType, resource: &Resource, key: &KeyDescriptor) -> bool {
    let kinds = ty.key_kinds();
    kinds.len() == key.len()
        && kinds.iter().all(|(name, kind)| {
            match (key.get(name), ty.key_literal(resource, name, *kind)) {
                (Some(expected), Ok(actual)) => expected == actual,
                _ => false,
            }
        })
}

impl ResourceStore for InMemoryStore {
    fn create(&mut self, set: &ResourceSet, properties: PropertyBag) -> StoreResult<Resource> {
        let ty = set.resource_type();
        let mut properties = properties;

        for (name, kind) in ty.key_kinds() {
            let current = properties.get(name).cloned().unwrap_or(Value::Null);
            match current {
                Value::Int(explicit) => self.observe_key(&set.name, explicit),
                Value::Null => match kind {
                    PrimitiveKind::Int32 | PrimitiveKind::Int64 => {
                        let key = self.next_key(&set.name);
                        properties.insert(name.to_string(), Value::Int(key));
                    }
                    _ => return Err(StoreError::missing_key(&set.name, name)),
                },
                _ => {}
            }
        }

        let id = self.id_alloc.alloc_resource_id();
        let resource = Resource::new(id, &set.name, properties);
        let literals = key_literals(ty, &resource)?;

        let bucket = self.resources.entry(set.name.clone()).or_default();
        for existing in bucket.values() {
            if key_literals(ty, existing)? == literals {
                return Err(StoreError::duplicate_key(&set.name, literals.join(",")));
            }
        }
        bucket.insert(id, resource.clone());

        debug!(set = %set.name, id = %id, "created resource");
        Ok(resource)
    }

    fn create_bulk(
        &mut self,
        set: &ResourceSet,
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>> {
        let mut created: Vec<Resource> = Vec::with_capacity(properties.len());
        for bag in properties {
            match self.create(set, bag) {
                Ok(resource) => created.push(resource),
                Err(err) => {
                    self.remove_all(&set.name, created.iter().map(|r| r.id));
                    return Err(err);
                }
            }
        }
        Ok(created)
    }

    fn fetch(&self, set: &ResourceSet, key: &KeyDescriptor) -> StoreResult<Option<Resource>> {
        let ty = set.resource_type();
        Ok(self
            .resources
            .get(&set.name)
            .and_then(|bucket| bucket.values().find(|r| matches_key(ty, r, key)))
            .cloned())
    }

    fn update(
        &mut self,
        set: &ResourceSet,
        existing: &Resource,
        key: &KeyDescriptor,
        properties: PropertyBag,
    ) -> StoreResult<Resource> {
        let ty = set.resource_type();
        let resource = self
            .resources
            .get_mut(&set.name)
            .and_then(|bucket| bucket.get_mut(&existing.id))
            .filter(|r| matches_key(ty, r, key))
            .ok_or_else(|| StoreError::not_found(&set.name, key.to_string()))?;

        for (name, kind) in ty.key_kinds() {
            if let Some(value) = properties.get(name) {
                let incoming = kind.to_literal(value);
                let current = ty.key_literal(resource, name, kind).ok();
                if incoming != current {
                    return Err(StoreError::key_change(&set.name, resource.id, name));
                }
            }
        }

        resource.merge(properties);
        debug!(set = %set.name, id = %resource.id, version = resource.version, "updated resource");
        Ok(resource.clone())
    }

    fn update_bulk(
        &mut self,
        set: &ResourceSet,
        existing: &[Resource],
        keys: &[KeyDescriptor],
        properties: Vec<PropertyBag>,
    ) -> StoreResult<Vec<Resource>> {
        if keys.len() != existing.len() {
            return Err(StoreError::length_mismatch(&set.name, existing.len(), keys.len()));
        }
        if properties.len() != existing.len() {
            return Err(StoreError::length_mismatch(
                &set.name,
                existing.len(),
                properties.len(),
            ));
        }

        let snapshots: Vec<Resource> = existing
            .iter()
            .filter_map(|r| self.get(&set.name, r.id).cloned())
            .collect();

        let mut updated = Vec::with_capacity(existing.len());
        for ((resource, key), bag) in existing.iter().zip(keys).zip(properties) {
            match self.update(set, resource, key, bag) {
                Ok(resource) => updated.push(resource),
                Err(err) => {
                    self.restore_all(&set.name, snapshots);
                    return Err(err);
                }
            }
        }
        Ok(updated)
    }

    fn hook_relationship(
        &mut self,
        source_set: &ResourceSet,
        source: &Resource,
        target_set: &ResourceSet,
        target: &Resource,
        edge_name: &str,
    ) -> StoreResult<()> {
        let navigation = source_set
            .resource_type()
            .get_navigation(edge_name)
            .ok_or_else(|| StoreError::unknown_navigation(&source_set.name, edge_name))?;
        if navigation.target_set != target_set.name {
            return Err(StoreError::navigation_target_mismatch(
                edge_name,
                &navigation.target_set,
                &target_set.name,
            ));
        }
        if self.get(&source_set.name, source.id).is_none() {
            return Err(StoreError::not_found(&source_set.name, source.id.to_string()));
        }
        if self.get(&target_set.name, target.id).is_none() {
            return Err(StoreError::not_found(&target_set.name, target.id.to_string()));
        }

        let targets = self
            .links
            .entry((source.id, edge_name.to_string()))
            .or_default();
        if navigation.many {
            if !targets.contains(&target.id) {
                targets.push(target.id);
            }
        } else {
            targets.clear();
            targets.push(target.id);
        }

        debug!(
            source = %source.id,
            target = %target.id,
            navigation = edge_name,
            "hooked relationship"
        );
        Ok(())
    }
}
