//! CatalogBuilder for constructing an immutable Catalog.

use crate::{Catalog, NavigationDef, PropertyDef, ResourceSet, ResourceType};
use inlay_core::PrimitiveKind;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog construction or property access.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Duplicate resource set name: {0}")]
    DuplicateSetName(String),

    #[error("Unknown type for resource set {set}: {type_name}")]
    UnknownType { set: String, type_name: String },

    #[error("Type {0} declares no key properties")]
    MissingKey(String),

    #[error("Key property {key} of type {type_name} is not a primitive property")]
    InvalidKeyProperty { type_name: String, key: String },

    #[error("Unknown property: {property} on type {type_name}")]
    UnknownProperty { type_name: String, property: String },
}

impl CatalogError {
    pub fn unknown_type(set: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            set: set.into(),
            type_name: type_name.into(),
        }
    }

    pub fn invalid_key_property(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidKeyProperty {
            type_name: type_name.into(),
            key: key.into(),
        }
    }

    pub fn unknown_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

/// Builder for constructing an immutable Catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    /// Types being built, by name.
    types: HashMap<String, ResourceType>,
    /// Set name to type name.
    sets: Vec<(String, String)>,
}

impl CatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        TypeBuilder {
            builder: self,
            name: name.into(),
            properties: Vec::new(),
            key_properties: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// Add a resource set holding resources of `type_name`.
    pub fn add_set(&mut self, name: impl Into<String>, type_name: impl Into<String>) -> &mut Self {
        self.sets.push((name.into(), type_name.into()));
        self
    }

    /// Build the immutable Catalog.
    pub fn build(self) -> CatalogResult<Catalog> {
        let types: HashMap<String, Arc<ResourceType>> = self
            .types
            .into_iter()
            .map(|(name, ty)| (name, Arc::new(ty)))
            .collect();

        let mut sets = HashMap::new();
        for (set_name, type_name) in self.sets {
            if sets.contains_key(&set_name) {
                return Err(CatalogError::DuplicateSetName(set_name));
            }
            let ty = types
                .get(&type_name)
                .ok_or_else(|| CatalogError::unknown_type(&set_name, &type_name))?;
            sets.insert(set_name.clone(), ResourceSet::new(set_name, Arc::clone(ty)));
        }

        Ok(Catalog::new(types, sets))
    }
}

/// Builder for a resource type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut CatalogBuilder,
    name: String,
    properties: Vec<PropertyDef>,
    key_properties: Vec<String>,
    navigations: Vec<NavigationDef>,
}

impl<'a> TypeBuilder<'a> {
    /// Add a key property (appended to the declared key order).
    pub fn key(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let name = name.into();
        self.key_properties.push(name.clone());
        self.properties.push(PropertyDef::new(name, kind));
        self
    }

    /// Add a structural property.
    pub fn property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Mark an already declared property as part of the key.
    pub fn key_ref(mut self, name: impl Into<String>) -> Self {
        self.key_properties.push(name.into());
        self
    }

    /// Add a to-one navigation property.
    pub fn navigation(mut self, name: impl Into<String>, target_set: impl Into<String>) -> Self {
        self.navigations.push(NavigationDef {
            name: name.into(),
            target_set: target_set.into(),
            many: false,
        });
        self
    }

    /// Add a to-many navigation property.
    pub fn navigation_many(mut self, name: impl Into<String>, target_set: impl Into<String>) -> Self {
        self.navigations.push(NavigationDef {
            name: name.into(),
            target_set: target_set.into(),
            many: true,
        });
        self
    }

    /// Finish building this type.
    pub fn done(self) -> CatalogResult<()> {
        if self.builder.types.contains_key(&self.name) {
            return Err(CatalogError::DuplicateTypeName(self.name));
        }
        if self.key_properties.is_empty() {
            return Err(CatalogError::MissingKey(self.name));
        }

        let ty = ResourceType {
            name: self.name.clone(),
            properties: self.properties,
            key_properties: self.key_properties,
            navigations: self.navigations,
        };

        for key in &ty.key_properties {
            let primitive = ty.get_property(key).and_then(|p| p.kind.primitive());
            if primitive.is_none() {
                return Err(CatalogError::invalid_key_property(&ty.name, key));
            }
        }

        self.builder.types.insert(self.name, ty);
        Ok(())
    }
}
