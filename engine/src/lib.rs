//! Inlay Engine
//!
//! Materialize write payloads (entity graphs) into resource store calls.
//!
//! Responsibilities:
//! - Validate the payload graph against the catalog before any write
//! - Decide create or update per node and mark each node with its key
//! - Hook up to-one relationships and bulk-write to-many feeds
//! - Verify the whole graph was processed
//!
//! # Module Structure
//!
//! - `materializer` - Main Materializer entry point
//! - `ops/` - Operation implementations (entity, link, feed)
//! - `validate` - Structural validation and the processed check
//! - `keys` - Key descriptor construction
//! - `deserialize` - PropertyDeserializer and TypedDeserializer
//! - `config` - EngineConfig
//! - `error` - Error types for materialization failures

mod config;
mod deserialize;
mod error;
mod keys;
mod materializer;
mod ops;
mod validate;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, EngineConfig, DEFAULT_MAX_DEPTH};
pub use deserialize::{PropertyDeserializer, TypedDeserializer};
pub use error::{DeserializeError, DeserializeResult, ErrorKind, MaterializeError, MaterializeResult};
pub use keys::{echo_key_properties, key_from_identifier, key_from_properties, key_from_resource};
pub use materializer::Materializer;
pub use validate::{ensure_processed, is_fully_processed, validate_graph};
