//! Node ids, tree nodes, and the document container.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockKind};
use super::error::TreeError;

/// Id of the unique root node of every document.
pub const ROOT_ID: &str = "ROOT";

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Stable string identifier of a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// A fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// DocumentNode
// ---------------------------------------------------------------------------

/// User-assigned metadata, independent of the block kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCustom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    pub id: NodeId,
    pub block: Block,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// Render order of the children.
    pub children: Vec<NodeId>,
    pub custom: NodeCustom,
    /// Hidden nodes stay in the tree but are skipped by the public view.
    pub hidden: bool,
}

impl DocumentNode {
    pub fn new(id: NodeId, block: Block, parent: Option<NodeId>) -> Self {
        Self {
            id,
            block,
            parent,
            children: Vec::new(),
            custom: NodeCustom::default(),
            hidden: false,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.block.kind()
    }

    /// The user-assigned label, falling back to the block kind.
    pub fn display_name(&self) -> &str {
        self.custom
            .display_name
            .as_deref()
            .unwrap_or_else(|| self.kind().as_str())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A whole menu document: a rooted tree stored as a flat id -> node map.
///
/// `parent` and `children` are only ever changed together (see
/// [`crate::document::mutation`]), so for every node its parent's child list
/// contains it exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: BTreeMap<NodeId, DocumentNode>,
}

impl Document {
    /// A document holding only an empty root container.
    pub fn new() -> Self {
        let root = DocumentNode::new(NodeId::root(), Block::default_for(BlockKind::Container), None);
        let mut nodes = BTreeMap::new();
        nodes.insert(root.id.clone(), root);
        Self { nodes }
    }

    /// The starting document for a new menu: the root container with the
    /// pinned header block.
    pub fn template() -> Self {
        let mut doc = Self::new();
        let header_id = NodeId::new("header");
        let header = DocumentNode::new(
            header_id.clone(),
            Block::default_for(BlockKind::Header),
            Some(NodeId::root()),
        );
        doc.nodes.insert(header_id.clone(), header);
        if let Some(root) = doc.nodes.get_mut(&NodeId::root()) {
            root.children.push(header_id);
        }
        doc
    }

    /// Build a document from already-linked nodes, checking every invariant.
    pub fn from_nodes(nodes: BTreeMap<NodeId, DocumentNode>) -> Result<Self, TreeError> {
        let doc = Self { nodes };
        doc.validate()?;
        Ok(doc)
    }

    pub fn root(&self) -> &DocumentNode {
        // `new` and `from_nodes` both guarantee a root.
        &self.nodes[&NodeId::root()]
    }

    pub fn node(&self, id: &NodeId) -> Option<&DocumentNode> {
        self.nodes.get(id)
    }

    /// Like [`Document::node`] but with a [`TreeError::NodeNotFound`].
    pub fn get(&self, id: &NodeId) -> Result<&DocumentNode, TreeError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Result<&mut DocumentNode, TreeError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TreeError::NodeNotFound(id.clone()))
    }

    pub(crate) fn insert(&mut self, node: DocumentNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn remove(&mut self, id: &NodeId) -> Option<DocumentNode> {
        self.nodes.remove(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &DocumentNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Nodes of the given kind, in render order.
    pub fn find_by_kind(&self, kind: BlockKind) -> Vec<&DocumentNode> {
        self.subtree(&NodeId::root())
            .into_iter()
            .filter_map(|id| self.nodes.get(&id))
            .filter(|n| n.kind() == kind)
            .collect()
    }

    /// `id` and all of its descendants, depth-first in child order.
    /// Empty when `id` is unknown.
    pub fn subtree(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(id) {
            return out;
        }
        let mut seen = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().cloned());
            }
            out.push(current);
        }
        out
    }

    /// Whether `candidate` is `ancestor` itself or lies below it.
    pub fn is_within(&self, candidate: &NodeId, ancestor: &NodeId) -> bool {
        let mut cursor = Some(candidate.clone());
        let mut steps = 0usize;
        while let Some(id) = cursor {
            if &id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent.clone());
        }
        false
    }

    /// The first node in `id`'s subtree, `id` included, whose kind cannot
    /// be deleted.
    pub fn pinned_within(&self, id: &NodeId) -> Option<&DocumentNode> {
        self.subtree(id)
            .into_iter()
            .filter_map(|n| self.nodes.get(&n))
            .find(|n| !n.kind().rules().can_delete)
    }

    /// Check every structural invariant of the tree.
    ///
    /// - a root with id `ROOT` and no parent exists
    /// - every other node's parent exists and lists it exactly once
    /// - every listed child exists and points back to the listing parent
    /// - only canvas blocks have children, and only of kinds they accept
    /// - singleton kinds appear at most once
    /// - every node is reachable from the root
    pub fn validate(&self) -> Result<(), TreeError> {
        let root_id = NodeId::root();
        let root = self
            .nodes
            .get(&root_id)
            .ok_or_else(|| TreeError::Inconsistent("missing root node".into()))?;
        if root.parent.is_some() {
            return Err(TreeError::Inconsistent("root node has a parent".into()));
        }

        for (id, node) in &self.nodes {
            if &node.id != id {
                return Err(TreeError::Inconsistent(format!(
                    "node stored under {id} carries id {}",
                    node.id
                )));
            }
            if !node.children.is_empty() && !node.kind().rules().is_canvas {
                return Err(TreeError::Inconsistent(format!(
                    "{} node {id} has children",
                    node.kind()
                )));
            }

            let mut seen = HashSet::new();
            for child in &node.children {
                if !seen.insert(child) {
                    return Err(TreeError::Inconsistent(format!(
                        "{child} listed twice under {id}"
                    )));
                }
                let child_node = self.nodes.get(child).ok_or_else(|| {
                    TreeError::Inconsistent(format!("{id} lists unknown child {child}"))
                })?;
                if !node.kind().accepts_child(child_node.kind()) {
                    return Err(TreeError::Inconsistent(format!(
                        "{} node {id} cannot hold {} node {child}",
                        node.kind(),
                        child_node.kind()
                    )));
                }
                if child_node.parent.as_ref() != Some(id) {
                    return Err(TreeError::Inconsistent(format!(
                        "{child} is listed under {id} but points elsewhere"
                    )));
                }
            }

            if id == &root_id {
                continue;
            }
            let parent_id = node.parent.as_ref().ok_or_else(|| {
                TreeError::Inconsistent(format!("non-root node {id} has no parent"))
            })?;
            let parent = self.nodes.get(parent_id).ok_or_else(|| {
                TreeError::Inconsistent(format!("{id} points at unknown parent {parent_id}"))
            })?;
            if !parent.children.contains(id) {
                return Err(TreeError::Inconsistent(format!(
                    "{parent_id} does not list its child {id}"
                )));
            }
        }

        for kind in BlockKind::ALL.iter().filter(|k| k.is_singleton()) {
            let count = self.nodes.values().filter(|n| n.kind() == *kind).count();
            if count > 1 {
                return Err(TreeError::Inconsistent(format!(
                    "{count} {kind} blocks, expected at most one"
                )));
            }
        }

        let reachable = self.subtree(&root_id).len();
        if reachable != self.nodes.len() {
            return Err(TreeError::Inconsistent(format!(
                "{} node(s) unreachable from the root",
                self.nodes.len() - reachable
            )));
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
