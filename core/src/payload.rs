//! Payload object model.
//!
//! The in-memory graph a wire-format reader produces for a write request:
//! entity nodes with raw properties, relationship edges, and collections
//! of nodes for to-many edges. The materializer consumes it and overwrites
//! each node's `id` (and each to-one edge's `target_url`) with a
//! [`KeyDescriptor`] once the target has been handled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::KeyDescriptor;

/// Raw property content as read off the wire, in payload order.
pub type RawProperties = IndexMap<String, serde_json::Value>;

/// Identity state of a node id or an edge target.
///
/// `Resolved` doubles as the "already materialized" marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    /// Nothing supplied.
    #[default]
    Unset,
    /// Identifier text from the payload, not yet resolved.
    Raw(String),
    /// Key descriptor written after materialization.
    Resolved(KeyDescriptor),
}

impl Marker {
    /// Raw identifier text, treating an empty string as absent.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Marker::Raw(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    /// The resolved descriptor, if any.
    pub fn resolved(&self) -> Option<&KeyDescriptor> {
        match self {
            Marker::Resolved(key) => Some(key),
            _ => None,
        }
    }

    /// Returns true if this marker has been resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Marker::Resolved(_))
    }

    /// Returns true if anything is present (raw text or descriptor).
    pub fn is_present(&self) -> bool {
        self.raw().is_some() || self.is_resolved()
    }
}

impl From<&str> for Marker {
    fn from(text: &str) -> Self {
        Marker::Raw(text.to_string())
    }
}

impl From<KeyDescriptor> for Marker {
    fn from(key: KeyDescriptor) -> Self {
        Marker::Resolved(key)
    }
}

/// One payload entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    /// Unset to create, raw identifier to update, resolved once done.
    #[serde(default)]
    pub id: Marker,
    /// Target resource set.
    pub resource_set_name: String,
    /// Resource type term carried by the payload, if any.
    #[serde(default)]
    pub type_name: Option<String>,
    /// Flat scalar and complex properties.
    #[serde(default)]
    pub properties: RawProperties,
    /// Navigation properties of this entity.
    #[serde(default)]
    pub edges: Vec<RelationshipEdge>,
}

impl EntityNode {
    /// A node for a new entity in the given set.
    pub fn new(resource_set_name: impl Into<String>) -> Self {
        Self {
            resource_set_name: resource_set_name.into(),
            ..Self::default()
        }
    }

    /// Set the identifier (update an existing entity).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Marker::Raw(id.into());
        self
    }

    /// Set the payload type term.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add a raw property.
    pub fn property(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Add a relationship edge.
    pub fn edge(mut self, edge: RelationshipEdge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Get an edge by navigation name.
    pub fn get_edge(&self, name: &str) -> Option<&RelationshipEdge> {
        self.edges.iter().find(|e| e.name == name)
    }
}

/// Inline payload for a relationship target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expanded {
    /// Single target entity (to-one).
    Entry(Box<EntityNode>),
    /// Batch of target entities (to-many).
    Feed(CollectionNode),
}

/// A named navigation property of its owning node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    /// Navigation property name on the owner.
    pub name: String,
    /// Link to an existing target.
    #[serde(default)]
    pub target_url: Marker,
    /// Inline target payload.
    #[serde(default)]
    pub expanded: Option<Expanded>,
}

impl RelationshipEdge {
    /// An edge with nothing attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Link to an existing target by identifier.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Marker::Raw(url.into());
        self
    }

    /// Attach a single inline target.
    pub fn with_entry(mut self, entry: EntityNode) -> Self {
        self.expanded = Some(Expanded::Entry(Box::new(entry)));
        self
    }

    /// Attach a batch of inline targets.
    pub fn with_feed(mut self, entries: Vec<EntityNode>) -> Self {
        self.expanded = Some(Expanded::Feed(CollectionNode { entries }));
        self
    }

    /// The expanded entry, if this edge carries one.
    pub fn entry(&self) -> Option<&EntityNode> {
        match &self.expanded {
            Some(Expanded::Entry(entry)) => Some(entry),
            _ => None,
        }
    }

    /// The expanded feed, if this edge carries one.
    pub fn feed(&self) -> Option<&CollectionNode> {
        match &self.expanded {
            Some(Expanded::Feed(feed)) => Some(feed),
            _ => None,
        }
    }
}

/// Ordered batch of entity nodes for a to-many edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionNode {
    pub entries: Vec<EntityNode>,
}

impl CollectionNode {
    pub fn new(entries: Vec<EntityNode>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
