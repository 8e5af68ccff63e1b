//! Inlay integration test harness.
//!
//! - `recording` - RecordingStore, a store double that logs every call
//! - `assertion` - call count and call sequence expectations
//! - `fixture` - the shared fixture catalog and key helpers
//! - `error` - harness errors

pub mod fixture;
pub mod recording;

use tracing_subscriber::filter::LevelFilter;

/// Install a debug-level fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

pub mod prelude {
    pub use crate::assertion::{verify_sequence, Calls};
    pub use crate::fixture::{catalog, maker_key, sub_key, widget_key};
    pub use crate::init_tracing;
    pub use crate::recording::{RecordingStore, StoreCall};
    pub use inlay_catalog::{Catalog, MetadataCatalog, ResourceSet};
    pub use inlay_core::{
        props, CollectionNode, EntityNode, Expanded, KeyDescriptor, Marker, RelationshipEdge,
        Resource, Value,
    };
    pub use inlay_engine::{
        is_fully_processed, EngineConfig, ErrorKind, MaterializeError, Materializer,
    };
    pub use inlay_store::{InMemoryStore, ResourceStore, StoreError};
    pub use serde_json::json;
}
