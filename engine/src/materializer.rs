//! Materializer - entry point for turning a payload into store writes.
//!
//! The materializer delegates to the operation modules in `ops/`:
//! - `ops/entity.rs` - create or update of a single node
//! - `ops/link.rs` - to-one relationships and edge dispatch
//! - `ops/feed.rs` - to-many relationships with bulk store calls

use inlay_catalog::{MetadataCatalog, ResourceSet};
use inlay_core::{EntityNode, RelationshipEdge, Resource};
use inlay_store::ResourceStore;
use tracing::{info, instrument};

use crate::config::EngineConfig;
use crate::deserialize::{PropertyDeserializer, TypedDeserializer};
use crate::error::MaterializeResult;
use crate::ops;
use crate::validate::{ensure_processed, validate_graph};

/// Payload materializer.
///
/// Borrows the catalog and the store for the duration of its use; the
/// payload graph passed to [`process_payload`](Self::process_payload) is
/// mutated in place.
pub struct Materializer<'a> {
    pub(crate) catalog: &'a dyn MetadataCatalog,
    pub(crate) store: &'a mut dyn ResourceStore,
    pub(crate) deserializer: Box<dyn PropertyDeserializer>,
    pub(crate) config: EngineConfig,
}

impl<'a> Materializer<'a> {
    /// Create a materializer with the typed deserializer and default config.
    pub fn new(catalog: &'a dyn MetadataCatalog, store: &'a mut dyn ResourceStore) -> Self {
        Self {
            catalog,
            store,
            deserializer: Box::new(TypedDeserializer::new()),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_deserializer(mut self, deserializer: impl PropertyDeserializer + 'static) -> Self {
        self.deserializer = Box::new(deserializer);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate, materialize and verify a whole payload graph.
    ///
    /// Returns the live resource for the root node. On success every
    /// reachable node id holds a key descriptor.
    #[instrument(skip_all, fields(set = %root.resource_set_name))]
    pub fn process_payload(&mut self, root: &mut EntityNode) -> MaterializeResult<Resource> {
        validate_graph(self.catalog, root, self.config.max_depth)?;

        let resource = ops::materialize_entity(self, root, 0)?;

        ensure_processed(root, self.config.max_depth)?;

        info!(id = %resource.id, "payload materialized");
        Ok(resource)
    }

    /// Materialize one relationship edge of an already stored source.
    ///
    /// Edges whose targets already carry a key descriptor are skipped, so
    /// this may be called again on an edge that was handled before.
    pub fn materialize_edge(
        &mut self,
        source_set: &ResourceSet,
        source: &Resource,
        edge: &mut RelationshipEdge,
    ) -> MaterializeResult<()> {
        ops::materialize_edge(self, source_set, source, edge, 0)
    }
}
