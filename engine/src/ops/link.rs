//! To-one relationship materialization and edge dispatch.

use inlay_catalog::ResourceSet;
use inlay_core::{split_identifier, Expanded, Marker, RelationshipEdge, Resource};
use tracing::debug;

use crate::error::{MaterializeError, MaterializeResult};
use crate::keys::key_from_identifier;
use crate::materializer::Materializer;
use crate::ops::entity::{materialize_addressed, materialize_entity, resolve_set, resource_type_of};
use crate::ops::feed::materialize_feed;

/// Materialize one edge of `source`, dispatching on its expanded content.
pub(crate) fn materialize_edge(
    m: &mut Materializer<'_>,
    source_set: &ResourceSet,
    source: &Resource,
    edge: &mut RelationshipEdge,
    depth: usize,
) -> MaterializeResult<()> {
    if matches!(edge.expanded, Some(Expanded::Feed(_))) {
        materialize_feed(m, source_set, source, edge, depth)
    } else {
        materialize_to_one(m, source_set, source, edge, depth)
    }
}

fn materialize_to_one(
    m: &mut Materializer<'_>,
    source_set: &ResourceSet,
    source: &Resource,
    edge: &mut RelationshipEdge,
    depth: usize,
) -> MaterializeResult<()> {
    // A target handled earlier in this pass (or a previous one) is not touched again
    let processed = edge.target_url.resolved().cloned().or_else(|| {
        edge.entry()
            .and_then(|entry| entry.id.resolved())
            .cloned()
    });
    if let Some(key) = processed {
        debug!(edge = %edge.name, key = %key, "relationship already processed");
        edge.target_url = Marker::Resolved(key);
        return Ok(());
    }

    let catalog = m.catalog;
    let url = edge.target_url.raw().map(str::to_string);

    match (url, &mut edge.expanded) {
        (None, None) => Ok(()),

        (Some(url), None) => {
            let (set_name, _) = split_identifier(&url)?;
            let target_set = resolve_set(catalog, set_name)?;
            let key = key_from_identifier(target_set.resource_type(), &url)?;
            let target = m
                .store
                .fetch(target_set, &key)?
                .ok_or_else(|| MaterializeError::target_not_found(&target_set.name, &key))?;

            m.store
                .hook_relationship(source_set, source, target_set, &target, &edge.name)?;
            debug!(edge = %edge.name, key = %key, "linked existing target");
            edge.target_url = Marker::Resolved(key);
            Ok(())
        }

        (None, Some(Expanded::Entry(entry))) => {
            let target = materialize_entity(m, entry, depth + 1)?;
            let target_set = resolve_set(catalog, &entry.resource_set_name)?;
            let key = entry.id.resolved().cloned().ok_or_else(|| {
                MaterializeError::invariant(format!("edge {} target left without a key", edge.name))
            })?;

            m.store
                .hook_relationship(source_set, source, target_set, &target, &edge.name)?;
            debug!(edge = %edge.name, key = %key, "linked expanded target");
            edge.target_url = Marker::Resolved(key);
            Ok(())
        }

        (Some(url), Some(Expanded::Entry(entry))) => {
            let (url_set, _) = split_identifier(&url)?;
            if url_set != entry.resource_set_name {
                return Err(MaterializeError::malformed(
                    format!("{}.target_url", edge.name),
                    format!(
                        "link names set {} but expanded entry belongs to {}",
                        url_set, entry.resource_set_name
                    ),
                ));
            }
            let target_set = resolve_set(catalog, &entry.resource_set_name)?;
            let ty = resource_type_of(catalog, target_set, entry)?;
            let key = key_from_identifier(ty, &url)?;
            if let Some(identifier) = entry.id.raw() {
                if key_from_identifier(ty, identifier)? != key {
                    return Err(MaterializeError::malformed(
                        format!("{}.target_url", edge.name),
                        "link and expanded entry address different resources",
                    ));
                }
            }

            let target = materialize_addressed(m, entry, Some(&url), depth + 1)?;
            m.store
                .hook_relationship(source_set, source, target_set, &target, &edge.name)?;
            debug!(edge = %edge.name, key = %key, "linked updated target");
            entry.id = Marker::Resolved(key.clone());
            edge.target_url = Marker::Resolved(key);
            Ok(())
        }

        (_, Some(Expanded::Feed(_))) => Err(MaterializeError::invariant(format!(
            "feed on edge {} dispatched as to-one",
            edge.name
        ))),
    }
}
