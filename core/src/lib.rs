//! Inlay Core Types
//!
//! This crate provides the foundational types used throughout Inlay:
//! - Primitive kinds and their canonical literal forms
//! - Value types (the Value enum and ordered property bags)
//! - Live resource snapshots (Resource, ResourceId)
//! - Key predicates, key descriptors and identifier splitting
//! - The payload object model (EntityNode, RelationshipEdge, CollectionNode)

mod error;
mod key;
mod kind;
mod payload;
mod resource;
mod value;

pub use error::*;
pub use key::*;
pub use kind::*;
pub use payload::*;
pub use resource::*;
pub use value::*;
