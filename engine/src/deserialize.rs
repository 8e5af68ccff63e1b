//! Property deserialization.
//!
//! Turns a node's raw wire properties into a typed [`PropertyBag`] for a
//! given resource type. The engine calls it the same way for single nodes
//! and for every entry of a feed.

use inlay_catalog::{PropertyKind, ResourceType};
use inlay_core::{EntityNode, PropertyBag, Value};

use crate::error::{DeserializeError, DeserializeResult};

/// Converts raw node properties into typed values.
pub trait PropertyDeserializer {
    fn deserialize(
        &self,
        resource_type: &ResourceType,
        node: &EntityNode,
    ) -> DeserializeResult<PropertyBag>;
}

/// Deserializer driven by the declared property kinds of a resource type.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedDeserializer;

impl TypedDeserializer {
    pub fn new() -> Self {
        Self
    }
}

impl PropertyDeserializer for TypedDeserializer {
    fn deserialize(
        &self,
        resource_type: &ResourceType,
        node: &EntityNode,
    ) -> DeserializeResult<PropertyBag> {
        let mut bag = PropertyBag::with_capacity(node.properties.len());

        for (name, raw) in &node.properties {
            let property = resource_type
                .get_property(name)
                .ok_or_else(|| DeserializeError::unknown_property(&resource_type.name, name))?;

            if raw.is_null() {
                if !property.nullable {
                    return Err(DeserializeError::null_not_allowed(&resource_type.name, name));
                }
                bag.insert(name.clone(), Value::Null);
                continue;
            }

            let (value, expected) = match property.kind {
                PropertyKind::Primitive(kind) => (kind.from_json(raw), kind.name()),
                PropertyKind::Complex if raw.is_object() => {
                    (Value::from_json_untyped(raw), "Complex")
                }
                PropertyKind::Complex => (None, "Complex"),
            };
            let value = value.ok_or_else(|| {
                DeserializeError::invalid_value(&resource_type.name, name, expected, raw.to_string())
            })?;
            bag.insert(name.clone(), value);
        }

        Ok(bag)
    }
}
