//! Resource type and resource set definitions.

use inlay_core::{KeyError, KeyResult, PrimitiveKind, Resource, Value};
use std::sync::Arc;

use crate::{CatalogError, CatalogResult};

/// Declared kind of a structural property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Single primitive value.
    Primitive(PrimitiveKind),
    /// Structured value carried as a nested bag.
    Complex,
}

impl PropertyKind {
    /// The primitive kind, if this is a primitive property.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            PropertyKind::Primitive(kind) => Some(*kind),
            PropertyKind::Complex => None,
        }
    }
}

/// Structural property definition within a type.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Declared kind.
    pub kind: PropertyKind,
    /// Whether this property accepts null.
    pub nullable: bool,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Primitive(kind),
            nullable: false,
        }
    }

    pub fn complex(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Complex,
            nullable: true,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Navigation property definition.
#[derive(Debug, Clone)]
pub struct NavigationDef {
    /// Navigation property name.
    pub name: String,
    /// Resource set the navigation points into.
    pub target_set: String,
    /// Whether the navigation is to-many.
    pub many: bool,
}

/// Resource (entity) type definition.
#[derive(Debug, Clone)]
pub struct ResourceType {
    /// Type name.
    pub name: String,
    /// Structural properties, in declaration order.
    pub properties: Vec<PropertyDef>,
    /// Key property names, in declared key order.
    pub key_properties: Vec<String>,
    /// Navigation properties.
    pub navigations: Vec<NavigationDef>,
}

impl ResourceType {
    /// Get a property definition by name.
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Get a navigation definition by name.
    pub fn get_navigation(&self, name: &str) -> Option<&NavigationDef> {
        self.navigations.iter().find(|n| n.name == name)
    }

    /// Key properties with their primitive kinds, in declared key order.
    ///
    /// The builder guarantees every key property is a primitive property.
    pub fn key_kinds(&self) -> Vec<(&str, PrimitiveKind)> {
        self.key_properties
            .iter()
            .filter_map(|name| {
                self.get_property(name)
                    .and_then(|p| p.kind.primitive())
                    .map(|kind| (name.as_str(), kind))
            })
            .collect()
    }

    /// Read a property value from a live resource.
    pub fn property_value<'r>(&self, resource: &'r Resource, name: &str) -> CatalogResult<&'r Value> {
        if self.get_property(name).is_none() {
            return Err(CatalogError::unknown_property(&self.name, name));
        }
        Ok(resource.get(name).unwrap_or(&Value::Null))
    }

    /// Write a property value on a live resource.
    pub fn set_property_value(
        &self,
        resource: &mut Resource,
        name: &str,
        value: Value,
    ) -> CatalogResult<()> {
        if self.get_property(name).is_none() {
            return Err(CatalogError::unknown_property(&self.name, name));
        }
        resource.set(name, value);
        Ok(())
    }

    /// Canonical literal of one key property of a live resource.
    pub fn key_literal(&self, resource: &Resource, name: &str, kind: PrimitiveKind) -> KeyResult<String> {
        let value = resource.get(name).unwrap_or(&Value::Null);
        if value.is_null() {
            return Err(KeyError::missing_key_value(name));
        }
        kind.to_literal(value)
            .ok_or_else(|| KeyError::type_mismatch(name, kind.name(), value.to_string()))
    }
}

/// A named collection of resources of one type.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    /// Set name.
    pub name: String,
    resource_type: Arc<ResourceType>,
}

impl ResourceSet {
    pub(crate) fn new(name: impl Into<String>, resource_type: Arc<ResourceType>) -> Self {
        Self {
            name: name.into(),
            resource_type,
        }
    }

    /// The type of resources held by this set.
    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }
}
