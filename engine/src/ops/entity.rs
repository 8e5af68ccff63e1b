//! Single-entity materialization: create or update one node.

use inlay_catalog::{MetadataCatalog, ResourceSet, ResourceType};
use inlay_core::{EntityNode, Marker, Resource};
use tracing::debug;

use crate::error::{MaterializeError, MaterializeResult};
use crate::keys::{echo_key_properties, key_from_identifier, key_from_resource};
use crate::materializer::Materializer;
use crate::ops::materialize_edge;

/// Materialize `node` and then every edge it owns.
///
/// An unset id creates, a raw identifier updates the resource it names,
/// and a resolved id is fetched and returned untouched.
pub(crate) fn materialize_entity(
    m: &mut Materializer<'_>,
    node: &mut EntityNode,
    depth: usize,
) -> MaterializeResult<Resource> {
    materialize_addressed(m, node, None, depth)
}

/// Like [`materialize_entity`], with `identifier` standing in for a node
/// that carries no raw id of its own. The node's id is only ever replaced
/// by the resulting key descriptor.
pub(super) fn materialize_addressed(
    m: &mut Materializer<'_>,
    node: &mut EntityNode,
    identifier: Option<&str>,
    depth: usize,
) -> MaterializeResult<Resource> {
    if depth > m.config.max_depth {
        return Err(MaterializeError::depth_exceeded(m.config.max_depth));
    }

    let catalog = m.catalog;
    let set = resolve_set(catalog, &node.resource_set_name)?;
    let ty = resource_type_of(catalog, set, node)?;

    if let Some(key) = node.id.resolved() {
        debug!(set = %set.name, key = %key, "entity already materialized");
        return m
            .store
            .fetch(set, key)?
            .ok_or_else(|| MaterializeError::target_not_found(&set.name, key));
    }

    let (resource, key) = match node.id.raw().or(identifier) {
        Some(identifier) => {
            let key = key_from_identifier(ty, identifier)?;
            let existing = m
                .store
                .fetch(set, &key)?
                .ok_or_else(|| MaterializeError::target_not_found(&set.name, &key))?;
            let properties = m.deserializer.deserialize(ty, node)?;
            let resource = m.store.update(set, &existing, &key, properties)?;
            debug!(set = %set.name, key = %key, "updated entity");
            (resource, key)
        }
        None => {
            let properties = m.deserializer.deserialize(ty, node)?;
            let resource = m.store.create(set, properties)?;
            let key = key_from_resource(ty, &resource)?;
            debug!(set = %set.name, key = %key, "created entity");
            (resource, key)
        }
    };

    echo_key_properties(ty, &resource, node);
    node.id = Marker::Resolved(key);

    for edge in node.edges.iter_mut() {
        materialize_edge(m, set, &resource, edge, depth)?;
    }

    Ok(resource)
}

pub(super) fn resolve_set<'c>(
    catalog: &'c dyn MetadataCatalog,
    name: &str,
) -> MaterializeResult<&'c ResourceSet> {
    catalog
        .resolve_resource_set(name)
        .ok_or_else(|| MaterializeError::unknown_resource_set(name))
}

/// The node's type term when it carries one, else the set's type.
pub(super) fn resource_type_of<'c>(
    catalog: &'c dyn MetadataCatalog,
    set: &'c ResourceSet,
    node: &EntityNode,
) -> MaterializeResult<&'c ResourceType> {
    let Some(type_name) = &node.type_name else {
        return Ok(set.resource_type());
    };
    let ty = catalog
        .resolve_resource_type(type_name)
        .ok_or_else(|| MaterializeError::unknown_resource_type(type_name))?;
    if ty.name != set.resource_type().name {
        return Err(MaterializeError::type_mismatch(
            &set.name,
            &set.resource_type().name,
            &ty.name,
        ));
    }
    Ok(ty)
}
