//! Key descriptor construction.
//!
//! Every path renders `name=literal` pairs (or takes predicate text from an
//! identifier) and feeds it through the same predicate parser and
//! validator, so descriptors from live resources and from identifiers
//! compare equal when they address the same resource.

use inlay_catalog::ResourceType;
use inlay_core::{
    split_identifier, EntityNode, KeyDescriptor, KeyError, PropertyBag, Resource, Value,
};

use crate::error::MaterializeResult;

/// Build a descriptor from a live resource's key property values.
pub fn key_from_resource(ty: &ResourceType, resource: &Resource) -> MaterializeResult<KeyDescriptor> {
    let keys = ty.key_kinds();
    let mut pairs = Vec::with_capacity(keys.len());
    for (name, kind) in &keys {
        let literal = ty.key_literal(resource, name, *kind)?;
        pairs.push(format!("{}={}", name, literal));
    }
    Ok(KeyDescriptor::parse(&pairs.join(", "), &ty.name, &keys)?)
}

/// Build a descriptor from an entity identifier such as `.../Orders(7)`.
pub fn key_from_identifier(ty: &ResourceType, identifier: &str) -> MaterializeResult<KeyDescriptor> {
    let (_, predicate) = split_identifier(identifier)?;
    Ok(KeyDescriptor::parse(predicate, &ty.name, &ty.key_kinds())?)
}

/// Build a descriptor from deserialized payload properties.
pub fn key_from_properties(ty: &ResourceType, properties: &PropertyBag) -> MaterializeResult<KeyDescriptor> {
    let keys = ty.key_kinds();
    let mut pairs = Vec::with_capacity(keys.len());
    for (name, kind) in &keys {
        let value = properties.get(*name).unwrap_or(&Value::Null);
        if value.is_null() {
            return Err(KeyError::missing_key_value(*name).into());
        }
        let literal = kind
            .to_literal(value)
            .ok_or_else(|| KeyError::type_mismatch(*name, kind.name(), value.to_string()))?;
        pairs.push(format!("{}={}", name, literal));
    }
    Ok(KeyDescriptor::parse(&pairs.join(", "), &ty.name, &keys)?)
}

/// Copy a live resource's key values into the node's raw properties.
///
/// Server-assigned keys become visible to whoever writes the response.
pub fn echo_key_properties(ty: &ResourceType, resource: &Resource, node: &mut EntityNode) {
    for name in &ty.key_properties {
        if let Some(value) = resource.get(name) {
            node.properties.insert(name.clone(), value.to_json());
        }
    }
}
