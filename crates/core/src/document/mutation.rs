//! Pure reducer over [`Document`].
//!
//! [`apply`] never modifies its input: it returns the next document or the
//! reason the mutation was rejected.

use super::block::{Block, BlockKind, PropsPatch};
use super::error::TreeError;
use super::node::{Document, DocumentNode, NodeId};

/// One editor action against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a new node under `parent` at `index` (end when `None`).
    CreateNode {
        id: NodeId,
        parent: NodeId,
        index: Option<usize>,
        block: Block,
    },
    /// Relocate a node and its subtree. `index` is clamped to the
    /// destination's child count.
    MoveNode {
        id: NodeId,
        parent: NodeId,
        index: usize,
    },
    /// Remove a node and its whole subtree.
    DeleteNode { id: NodeId },
    /// Shallow-merge a props patch.
    SetProp { id: NodeId, patch: PropsPatch },
    SetHidden { id: NodeId, hidden: bool },
    Rename {
        id: NodeId,
        display_name: Option<String>,
    },
}

impl Mutation {
    /// The node the mutation is aimed at.
    pub fn target(&self) -> &NodeId {
        match self {
            Self::CreateNode { id, .. }
            | Self::MoveNode { id, .. }
            | Self::DeleteNode { id }
            | Self::SetProp { id, .. }
            | Self::SetHidden { id, .. }
            | Self::Rename { id, .. } => id,
        }
    }

    /// `true` for mutations that touch neither structure nor props.
    pub fn is_metadata_only(&self) -> bool {
        matches!(self, Self::SetHidden { .. } | Self::Rename { .. })
    }
}

/// Apply one mutation, returning the resulting document.
pub fn apply(document: &Document, mutation: Mutation) -> Result<Document, TreeError> {
    let mut next = document.clone();
    apply_in_place(&mut next, mutation)?;
    Ok(next)
}

/// Apply mutations in order. Either all of them apply or none do.
pub fn apply_all(
    document: &Document,
    mutations: impl IntoIterator<Item = Mutation>,
) -> Result<Document, TreeError> {
    let mut next = document.clone();
    for mutation in mutations {
        apply_in_place(&mut next, mutation)?;
    }
    Ok(next)
}

/// Each arm finishes validating before it writes, so a rejected mutation
/// leaves `doc` as it was.
fn apply_in_place(doc: &mut Document, mutation: Mutation) -> Result<(), TreeError> {
    match mutation {
        Mutation::CreateNode {
            id,
            parent,
            index,
            block,
        } => create_node(doc, id, parent, index, block),
        Mutation::MoveNode { id, parent, index } => move_node(doc, &id, parent, index),
        Mutation::DeleteNode { id } => delete_node(doc, &id),
        Mutation::SetProp { id, patch } => {
            let merged = doc.get(&id)?.block.merged(&patch)?;
            doc.get_mut(&id)?.block = merged;
            Ok(())
        }
        Mutation::SetHidden { id, hidden } => {
            doc.get_mut(&id)?.hidden = hidden;
            Ok(())
        }
        Mutation::Rename { id, display_name } => {
            doc.get_mut(&id)?.custom.display_name = display_name;
            Ok(())
        }
    }
}

fn check_canvas(doc: &Document, parent: &NodeId, child: BlockKind) -> Result<(), TreeError> {
    let node = doc.node(parent).ok_or_else(|| TreeError::InvalidParent {
        parent: parent.clone(),
        reason: "parent does not exist",
    })?;
    if !node.kind().rules().is_canvas {
        return Err(TreeError::InvalidParent {
            parent: parent.clone(),
            reason: "block does not accept children",
        });
    }
    if !node.kind().accepts_child(child) {
        return Err(TreeError::InvalidParent {
            parent: parent.clone(),
            reason: "block does not accept children of this kind",
        });
    }
    Ok(())
}

fn create_node(
    doc: &mut Document,
    id: NodeId,
    parent: NodeId,
    index: Option<usize>,
    block: Block,
) -> Result<(), TreeError> {
    if doc.contains(&id) {
        return Err(TreeError::DuplicateId(id));
    }
    let kind = block.kind();
    if kind.is_singleton() && !doc.find_by_kind(kind).is_empty() {
        return Err(TreeError::Singleton { kind });
    }
    check_canvas(doc, &parent, kind)?;

    let siblings = &mut doc.get_mut(&parent)?.children;
    let at = index.unwrap_or(siblings.len()).min(siblings.len());
    siblings.insert(at, id.clone());
    doc.insert(DocumentNode::new(id, block, Some(parent)));
    Ok(())
}

fn move_node(
    doc: &mut Document,
    id: &NodeId,
    new_parent: NodeId,
    index: usize,
) -> Result<(), TreeError> {
    let node = doc.get(id)?;
    let kind = node.kind();
    let old_parent = match &node.parent {
        Some(p) if kind.rules().can_drag => p.clone(),
        _ => {
            return Err(TreeError::NotMoveable {
                node: id.clone(),
                kind,
            })
        }
    };
    if doc.is_within(&new_parent, id) {
        return Err(TreeError::Cycle {
            node: id.clone(),
            parent: new_parent,
        });
    }
    check_canvas(doc, &new_parent, kind)?;

    doc.get_mut(&old_parent)?.children.retain(|c| c != id);
    let siblings = &mut doc.get_mut(&new_parent)?.children;
    let at = index.min(siblings.len());
    siblings.insert(at, id.clone());
    doc.get_mut(id)?.parent = Some(new_parent);
    Ok(())
}

fn delete_node(doc: &mut Document, id: &NodeId) -> Result<(), TreeError> {
    let node = doc.get(id)?;
    let kind = node.kind();
    let parent = match &node.parent {
        Some(p) if kind.rules().can_delete => p.clone(),
        _ => {
            return Err(TreeError::NotDeletable {
                node: id.clone(),
                kind,
            })
        }
    };

    if let Some(pinned) = doc.pinned_within(id) {
        return Err(TreeError::NotDeletable {
            node: pinned.id.clone(),
            kind: pinned.kind(),
        });
    }

    let doomed = doc.subtree(id);
    doc.get_mut(&parent)?.children.retain(|c| c != id);
    for victim in &doomed {
        doc.remove(victim);
    }
    Ok(())
}
