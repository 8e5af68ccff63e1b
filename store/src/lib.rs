//! Inlay Store
//!
//! The resource store port the materializer writes through, and an
//! in-memory implementation of it.
//!
//! - `store` - the ResourceStore trait
//! - `memory` - InMemoryStore
//! - `error` - StoreError

mod error;
mod memory;
mod store;

pub use error::*;
pub use memory::*;
pub use store::*;
