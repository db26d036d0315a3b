//! Per-kind staleness rules.
//!
//! Comparisons are shallow and field-scoped:
//!
//! | Block           | Stale when |
//! |-----------------|------------|
//! | `Category`      | category `updatedAt` differs or category is gone; any embedded item is gone or has a different `updatedAt`; the live category holds items the snapshot lacks |
//! | `FeaturedItems` | featured id set differs, or any item's `updatedAt` differs |
//! | `Item`          | item is gone or its `updatedAt` differs |
//! | `Header`        | rendered organization fields (name, logo, banner) differ |
//! | `Location`      | rendered location fields differ, or the location is gone |
//!
//! Blocks without a bound snapshot are never stale.

use std::collections::BTreeSet;

use serde::Serialize;

use super::snapshot::{ItemSnapshot, LiveData, LocationSnapshot, OrganizationSnapshot};
use crate::document::block::{Block, BlockKind, CategoryProps};
use crate::document::node::{Document, NodeId};

/// Whole-document verdict. The UI shows a single banner, not a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncVerdict {
    InSync,
    OutOfSync,
}

impl SyncVerdict {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, Self::InSync)
    }
}

/// How one block's snapshot relates to the live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Current,
    /// The record still exists but the snapshot is out of date.
    Changed,
    /// The referenced record no longer exists.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleNode {
    pub id: NodeId,
    pub kind: BlockKind,
    pub freshness: Freshness,
}

/// Decide whether every snapshot in `document` matches `live`.
pub fn check_sync(document: &Document, live: &LiveData) -> SyncVerdict {
    if stale_nodes(document, live).is_empty() {
        SyncVerdict::InSync
    } else {
        SyncVerdict::OutOfSync
    }
}

/// Every node whose snapshot is not [`Freshness::Current`], in render order.
/// Hidden nodes are included.
pub fn stale_nodes(document: &Document, live: &LiveData) -> Vec<StaleNode> {
    document
        .subtree(&NodeId::root())
        .into_iter()
        .filter_map(|id| {
            let node = document.node(&id)?;
            match block_freshness(&node.block, live) {
                Freshness::Current => None,
                freshness => Some(StaleNode {
                    id,
                    kind: node.kind(),
                    freshness,
                }),
            }
        })
        .collect()
}

pub fn block_freshness(block: &Block, live: &LiveData) -> Freshness {
    match block {
        Block::Header(props) => {
            organization_freshness(props.organization.as_ref(), live.organization.as_ref())
        }
        Block::Location(props) => {
            location_freshness(props.location.as_ref(), live.location.as_ref())
        }
        Block::Category(props) => category_freshness(props, live),
        Block::FeaturedItems(props) => featured_freshness(&props.items, &live.featured),
        Block::Item(props) => match &props.item {
            None => Freshness::Current,
            Some(snap) => match live.item(snap.id) {
                None => Freshness::Missing,
                Some(current) if snap.is_current_with(current) => Freshness::Current,
                Some(_) => Freshness::Changed,
            },
        },
        Block::Container(_) | Block::Text(_) => Freshness::Current,
    }
}

/// Without a live organization there is nothing to compare against, and
/// the header is never removed.
fn organization_freshness(
    snapshot: Option<&OrganizationSnapshot>,
    live: Option<&OrganizationSnapshot>,
) -> Freshness {
    match (snapshot, live) {
        (Some(snap), Some(current)) if !snap.renders_same_as(current) => Freshness::Changed,
        _ => Freshness::Current,
    }
}

fn location_freshness(
    snapshot: Option<&LocationSnapshot>,
    live: Option<&LocationSnapshot>,
) -> Freshness {
    match (snapshot, live) {
        (None, _) => Freshness::Current,
        (Some(_), None) => Freshness::Missing,
        (Some(snap), Some(current)) if snap.renders_same_as(current) => Freshness::Current,
        (Some(_), Some(_)) => Freshness::Changed,
    }
}

fn category_freshness(props: &CategoryProps, live: &LiveData) -> Freshness {
    let Some(snap) = &props.data else {
        return Freshness::Current;
    };
    let Some(current) = live.category(snap.id) else {
        return Freshness::Missing;
    };
    if snap.updated_at != current.category.updated_at {
        return Freshness::Changed;
    }
    if !items_match(&props.menu_items, &current.items) {
        return Freshness::Changed;
    }
    Freshness::Current
}

fn featured_freshness(snapshot: &[ItemSnapshot], live: &[ItemSnapshot]) -> Freshness {
    if items_match(snapshot, live) {
        Freshness::Current
    } else {
        Freshness::Changed
    }
}

/// Same id set, and every snapshot item current with its live counterpart.
fn items_match(snapshot: &[ItemSnapshot], live: &[ItemSnapshot]) -> bool {
    let snap_ids: BTreeSet<_> = snapshot.iter().map(|i| i.id).collect();
    let live_ids: BTreeSet<_> = live.iter().map(|i| i.id).collect();
    if snap_ids != live_ids {
        return false;
    }
    snapshot.iter().all(|snap| {
        live.iter()
            .find(|i| i.id == snap.id)
            .is_some_and(|current| snap.is_current_with(current))
    })
}
