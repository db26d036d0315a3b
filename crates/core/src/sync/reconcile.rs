//! Repair of stale snapshots.
//!
//! Repairs are ordinary [`Mutation`]s: a changed snapshot becomes a
//! `SetProp` patch carrying the live record, a snapshot whose record is gone
//! becomes a `DeleteNode`. Applying the plan to the document it was computed
//! from always yields a document that [`check_sync`](super::check_sync)
//! reports as in sync, so running the repair twice changes nothing more.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use super::compare::{block_freshness, Freshness};
use super::snapshot::LiveData;
use crate::document::block::{Block, PropsPatch};
use crate::document::error::TreeError;
use crate::document::mutation::{apply_all, Mutation};
use crate::document::node::{Document, NodeId};

/// Re-bind every stale snapshot in `document` to `live`.
pub fn sync_document(document: &Document, live: &LiveData) -> Result<Document, TreeError> {
    let repairs = plan_repairs(document, live)?;
    apply_all(document, repairs)
}

/// The mutations [`sync_document`] would apply, in render order. Nodes below
/// a deleted node are skipped since the delete takes them along. A node
/// whose subtree holds a pinned block is never deleted.
pub fn plan_repairs(document: &Document, live: &LiveData) -> Result<Vec<Mutation>, TreeError> {
    let mut repairs = Vec::new();
    let mut doomed: HashSet<NodeId> = HashSet::new();

    for id in document.subtree(&NodeId::root()) {
        if doomed.contains(&id) {
            continue;
        }
        let node = document.get(&id)?;
        if !node.kind().carries_snapshot() {
            continue;
        }
        match block_freshness(&node.block, live) {
            Freshness::Current => {}
            Freshness::Missing if document.pinned_within(&id).is_none() => {
                doomed.extend(document.subtree(&id));
                repairs.push(Mutation::DeleteNode { id });
            }
            Freshness::Missing | Freshness::Changed => {
                if let Some(patch) = repair_patch(&node.block, live)? {
                    repairs.push(Mutation::SetProp { id, patch });
                }
            }
        }
    }
    Ok(repairs)
}

/// The props patch that copies the live record into `block`, or `None`
/// when there is no live record to copy.
fn repair_patch(block: &Block, live: &LiveData) -> Result<Option<PropsPatch>, TreeError> {
    let entries: Vec<(&str, Value)> = match block {
        Block::Header(_) => match &live.organization {
            Some(org) => vec![("organization", to_value(block, org)?)],
            None => return Ok(None),
        },
        Block::Location(_) => match &live.location {
            Some(location) => vec![("location", to_value(block, location)?)],
            None => return Ok(None),
        },
        Block::Category(props) => {
            let Some(current) = props.data.as_ref().and_then(|d| live.category(d.id)) else {
                return Ok(None);
            };
            vec![
                ("data", to_value(block, &current.category)?),
                ("menuItems", to_value(block, &current.items)?),
            ]
        }
        Block::FeaturedItems(_) => vec![("items", to_value(block, &live.featured)?)],
        Block::Item(props) => {
            let Some(current) = props.item.as_ref().and_then(|i| live.item(i.id)) else {
                return Ok(None);
            };
            vec![("item", to_value(block, current)?)]
        }
        Block::Container(_) | Block::Text(_) => return Ok(None),
    };

    Ok(Some(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    ))
}

fn to_value<T: Serialize>(block: &Block, record: &T) -> Result<Value, TreeError> {
    serde_json::to_value(record).map_err(|e| TreeError::InvalidProps {
        kind: block.kind(),
        message: e.to_string(),
    })
}
