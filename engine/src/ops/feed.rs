//! To-many relationship materialization with one bulk store call per feed.

use inlay_catalog::ResourceSet;
use inlay_core::{Expanded, KeyDescriptor, Marker, RelationshipEdge, Resource};
use tracing::{debug, warn};

use crate::error::{MaterializeError, MaterializeResult};
use crate::keys::{echo_key_properties, key_from_identifier, key_from_properties, key_from_resource};
use crate::materializer::Materializer;
use crate::ops::entity::resolve_set;
use crate::ops::materialize_edge;

/// Materialize every entry of a feed edge.
///
/// Entries are created (or, when the edge carries a link, updated) in a
/// single bulk call, then hooked and recursed into one by one. A feed
/// whose first entry is already marked is skipped as a whole.
pub(crate) fn materialize_feed(
    m: &mut Materializer<'_>,
    source_set: &ResourceSet,
    source: &Resource,
    edge: &mut RelationshipEdge,
    depth: usize,
) -> MaterializeResult<()> {
    let update = edge.target_url.is_present();
    let Some(Expanded::Feed(feed)) = &mut edge.expanded else {
        return Ok(());
    };
    let Some(first) = feed.entries.first() else {
        return Ok(());
    };

    if first.id.is_resolved() {
        if feed.entries.iter().all(|e| e.id.is_resolved()) {
            debug!(edge = %edge.name, entries = feed.len(), "feed already processed");
        } else {
            warn!(
                edge = %edge.name,
                entries = feed.len(),
                "first feed entry already processed, skipping partially processed feed"
            );
        }
        return Ok(());
    }

    if depth + 1 > m.config.max_depth {
        return Err(MaterializeError::depth_exceeded(m.config.max_depth));
    }

    let set_name = first.resource_set_name.clone();
    if let Some(other) = feed.entries.iter().find(|e| e.resource_set_name != set_name) {
        return Err(MaterializeError::mixed_feed(
            &edge.name,
            &set_name,
            &other.resource_set_name,
        ));
    }
    let catalog = m.catalog;
    let set = resolve_set(catalog, &set_name)?;
    let ty = set.resource_type();

    let mut bags = Vec::with_capacity(feed.len());
    for entry in &feed.entries {
        bags.push(m.deserializer.deserialize(ty, entry)?);
    }

    let (resources, keys): (Vec<Resource>, Vec<KeyDescriptor>) = if update {
        let mut keys = Vec::with_capacity(feed.len());
        for (entry, bag) in feed.entries.iter().zip(&bags) {
            let key = match entry.id.raw() {
                Some(identifier) => key_from_identifier(ty, identifier)?,
                None => key_from_properties(ty, bag)?,
            };
            keys.push(key);
        }

        let mut existing = Vec::with_capacity(keys.len());
        for key in &keys {
            let resource = m
                .store
                .fetch(set, key)?
                .ok_or_else(|| MaterializeError::target_not_found(&set.name, key))?;
            existing.push(resource);
        }

        debug!(edge = %edge.name, set = %set.name, entries = keys.len(), "bulk update");
        let updated = m.store.update_bulk(set, &existing, &keys, bags)?;
        (updated, keys)
    } else {
        debug!(edge = %edge.name, set = %set.name, entries = bags.len(), "bulk create");
        let created = m.store.create_bulk(set, bags)?;
        let keys = created
            .iter()
            .map(|resource| key_from_resource(ty, resource))
            .collect::<MaterializeResult<Vec<_>>>()?;
        (created, keys)
    };

    if resources.len() != feed.len() {
        return Err(MaterializeError::invariant(format!(
            "store returned {} resources for {} entries of feed {}",
            resources.len(),
            feed.len(),
            edge.name
        )));
    }

    for ((entry, resource), key) in feed.entries.iter_mut().zip(&resources).zip(keys) {
        m.store
            .hook_relationship(source_set, source, set, resource, &edge.name)?;
        echo_key_properties(ty, resource, entry);
        entry.id = Marker::Resolved(key);
    }

    for (entry, resource) in feed.entries.iter_mut().zip(&resources) {
        for child in entry.edges.iter_mut() {
            materialize_edge(m, set, resource, child, depth + 1)?;
        }
    }

    Ok(())
}
