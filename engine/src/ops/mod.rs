//! Materialization operations.
//!
//! Each operation takes the materializer it runs under plus the depth of
//! the node it works on, so every recursive path shares one depth ceiling.

mod entity;
mod feed;
mod link;

pub(crate) use entity::materialize_entity;
pub(crate) use link::materialize_edge;
