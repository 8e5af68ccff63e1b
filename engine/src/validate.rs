//! Graph checks run before and after materialization.
//!
//! `validate_graph` is a read-only structural pass; nothing is written to
//! the store if it fails. `is_fully_processed` walks the same tree looking
//! for nodes without a key descriptor.

use inlay_catalog::MetadataCatalog;
use inlay_core::{EntityNode, Expanded};

use crate::error::{MaterializeError, MaterializeResult};

/// Check the shape of a payload graph and resolve every set and type name.
pub fn validate_graph(
    catalog: &dyn MetadataCatalog,
    root: &EntityNode,
    max_depth: usize,
) -> MaterializeResult<()> {
    validate_node(catalog, root, &root.resource_set_name, 0, max_depth)
}

fn validate_node(
    catalog: &dyn MetadataCatalog,
    node: &EntityNode,
    path: &str,
    depth: usize,
    max_depth: usize,
) -> MaterializeResult<()> {
    if depth > max_depth {
        return Err(MaterializeError::depth_exceeded(max_depth));
    }

    let set = catalog
        .resolve_resource_set(&node.resource_set_name)
        .ok_or_else(|| MaterializeError::unknown_resource_set(&node.resource_set_name))?;
    if let Some(type_name) = &node.type_name {
        let ty = catalog
            .resolve_resource_type(type_name)
            .ok_or_else(|| MaterializeError::unknown_resource_type(type_name))?;
        if ty.name != set.resource_type().name {
            return Err(MaterializeError::type_mismatch(
                &set.name,
                &set.resource_type().name,
                &ty.name,
            ));
        }
    }

    for edge in &node.edges {
        let edge_path = format!("{}/{}", path, edge.name);
        if edge.target_url.is_resolved() {
            return Err(MaterializeError::malformed(
                format!("{}.target_url", edge_path),
                "expected an identifier, found a key descriptor",
            ));
        }

        match &edge.expanded {
            None => {}
            Some(Expanded::Entry(entry)) => {
                validate_node(catalog, entry, &edge_path, depth + 1, max_depth)?;
            }
            Some(Expanded::Feed(feed)) => {
                if let Some(first) = feed.entries.first() {
                    if let Some(other) = feed
                        .entries
                        .iter()
                        .find(|e| e.resource_set_name != first.resource_set_name)
                    {
                        return Err(MaterializeError::mixed_feed(
                            &edge_path,
                            &first.resource_set_name,
                            &other.resource_set_name,
                        ));
                    }
                }
                for (i, entry) in feed.entries.iter().enumerate() {
                    let entry_path = format!("{}[{}]", edge_path, i);
                    validate_node(catalog, entry, &entry_path, depth + 1, max_depth)?;
                }
            }
        }
    }

    Ok(())
}

/// Returns true if every reachable node's id is a key descriptor.
///
/// Exceeding `max_depth` is an invariant violation, not a `false`.
pub fn is_fully_processed(root: &EntityNode, max_depth: usize) -> MaterializeResult<bool> {
    Ok(first_unprocessed(root, &root.resource_set_name, 0, max_depth)?.is_none())
}

/// Fail unless every reachable node's id is a key descriptor.
pub fn ensure_processed(root: &EntityNode, max_depth: usize) -> MaterializeResult<()> {
    match first_unprocessed(root, &root.resource_set_name, 0, max_depth)? {
        None => Ok(()),
        Some(path) => Err(MaterializeError::not_processed(path)),
    }
}

fn first_unprocessed(
    node: &EntityNode,
    path: &str,
    depth: usize,
    max_depth: usize,
) -> MaterializeResult<Option<String>> {
    if depth > max_depth {
        return Err(MaterializeError::depth_exceeded(max_depth));
    }
    if !node.id.is_resolved() {
        return Ok(Some(path.to_string()));
    }

    for edge in &node.edges {
        let edge_path = format!("{}/{}", path, edge.name);
        match &edge.expanded {
            None => {}
            Some(Expanded::Entry(entry)) => {
                if let Some(found) = first_unprocessed(entry, &edge_path, depth + 1, max_depth)? {
                    return Ok(Some(found));
                }
            }
            Some(Expanded::Feed(feed)) => {
                for (i, entry) in feed.entries.iter().enumerate() {
                    let entry_path = format!("{}[{}]", edge_path, i);
                    if let Some(found) = first_unprocessed(entry, &entry_path, depth + 1, max_depth)? {
                        return Ok(Some(found));
                    }
                }
            }
        }
    }

    Ok(None)
}
