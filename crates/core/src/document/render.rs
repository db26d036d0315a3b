//! Visit order for renderers.
//!
//! Renderers must emit each node's children exactly in `children` order.
//! The public view skips hidden nodes (with everything below them); the
//! editing view keeps them and flags them so they can be drawn dimmed.

use serde::Serialize;

use super::block::{Block, BlockKind};
use super::node::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Editing,
    Public,
}

/// One block in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntry {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub kind: BlockKind,
    pub display_name: String,
    pub hidden: bool,
    #[serde(flatten)]
    pub block: Block,
}

/// Depth-first, pre-order walk of `document` from the root.
pub fn render_order(document: &Document, mode: RenderMode) -> Vec<RenderEntry> {
    let mut out = Vec::with_capacity(document.len());
    let mut stack = vec![(document.root().id.clone(), 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let Some(node) = document.node(&id) else {
            continue;
        };
        if node.hidden && mode == RenderMode::Public {
            continue;
        }
        for child in node.children.iter().rev() {
            stack.push((child.clone(), depth + 1));
        }
        out.push(RenderEntry {
            id: node.id.clone(),
            parent: node.parent.clone(),
            depth,
            kind: node.kind(),
            display_name: node.display_name().to_string(),
            hidden: node.hidden,
            block: node.block.clone(),
        });
    }
    out
}
