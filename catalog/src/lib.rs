//! Inlay Catalog
//!
//! Metadata catalog: resource types, resource sets and the name
//! resolution the materializer performs against them.
//!
//! - `types` - ResourceType, ResourceSet, property and navigation definitions
//! - `catalog` - the MetadataCatalog trait and the immutable Catalog
//! - `builder` - CatalogBuilder and catalog errors

mod builder;
mod catalog;
mod types;

pub use builder::*;
pub use catalog::*;
pub use types::*;
