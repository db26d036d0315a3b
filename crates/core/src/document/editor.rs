//! Editing session: current document, linear undo/redo history, selection.
//!
//! The session owns its history explicitly; there is no ambient editor
//! state. Every accepted structural or props mutation pushes one history
//! entry. Whether rename and hide/show push entries is decided by
//! [`HistoryPolicy`]. History entries are whole-document snapshots, so
//! undoing past an unrecorded metadata change also reverts that change.

use std::collections::HashSet;

use super::block::{Block, PropsPatch};
use super::error::TreeError;
use super::mutation::{apply, apply_all, Mutation};
use super::node::{Document, NodeId};
use crate::sync::reconcile::plan_repairs;
use crate::sync::snapshot::LiveData;

/// Default maximum number of undo entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Which mutations create history entries, and how many are kept.
///
/// An unrecorded mutation still clears the redo stack. Undoing past it
/// restores the snapshot taken before it, so it is reverted with that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    pub record_rename: bool,
    pub record_hidden: bool,
    /// Oldest entries are dropped beyond this many. Zero disables undo.
    pub limit: usize,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            record_rename: true,
            record_hidden: true,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl HistoryPolicy {
    fn records(&self, mutation: &Mutation) -> bool {
        match mutation {
            Mutation::Rename { .. } => self.record_rename,
            Mutation::SetHidden { .. } => self.record_hidden,
            _ => true,
        }
    }
}

pub struct Editor {
    document: Document,
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
    policy: HistoryPolicy,
    selection: Option<NodeId>,
    /// Every id seen in this session, deleted or not.
    issued: HashSet<NodeId>,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self::with_policy(document, HistoryPolicy::default())
    }

    pub fn with_policy(document: Document, policy: HistoryPolicy) -> Self {
        let issued = document.node_ids().cloned().collect();
        Self {
            document,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            policy,
            selection: None,
            issued,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, id: &NodeId) -> Result<(), TreeError> {
        self.document.get(id)?;
        self.selection = Some(id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert a block under `parent` and return its freshly minted id.
    pub fn create_node(
        &mut self,
        block: Block,
        parent: &NodeId,
        index: Option<usize>,
    ) -> Result<NodeId, TreeError> {
        let mut id = NodeId::generate();
        while self.issued.contains(&id) {
            id = NodeId::generate();
        }
        self.apply(Mutation::CreateNode {
            id: id.clone(),
            parent: parent.clone(),
            index,
            block,
        })?;
        Ok(id)
    }

    pub fn move_node(&mut self, id: &NodeId, parent: &NodeId, index: usize) -> Result<(), TreeError> {
        self.apply(Mutation::MoveNode {
            id: id.clone(),
            parent: parent.clone(),
            index,
        })
    }

    pub fn delete_node(&mut self, id: &NodeId) -> Result<(), TreeError> {
        self.apply(Mutation::DeleteNode { id: id.clone() })
    }

    pub fn set_prop(&mut self, id: &NodeId, patch: PropsPatch) -> Result<(), TreeError> {
        self.apply(Mutation::SetProp {
            id: id.clone(),
            patch,
        })
    }

    /// Edit a node's block through a closure. The change is recorded as an
    /// ordinary props patch; changing the block kind is rejected.
    pub fn update_props<F>(&mut self, id: &NodeId, update: F) -> Result<(), TreeError>
    where
        F: FnOnce(&mut Block),
    {
        let current = &self.document.get(id)?.block;
        let mut edited = current.clone();
        update(&mut edited);
        if edited.kind() != current.kind() {
            return Err(TreeError::InvalidProps {
                kind: current.kind(),
                message: format!("cannot change block kind to {}", edited.kind()),
            });
        }
        let patch = edited.props_map()?;
        self.set_prop(id, patch)
    }

    pub fn set_hidden(&mut self, id: &NodeId, hidden: bool) -> Result<(), TreeError> {
        self.apply(Mutation::SetHidden {
            id: id.clone(),
            hidden,
        })
    }

    pub fn rename(&mut self, id: &NodeId, display_name: Option<String>) -> Result<(), TreeError> {
        self.apply(Mutation::Rename {
            id: id.clone(),
            display_name,
        })
    }

    /// Apply one mutation. On error the session is unchanged.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), TreeError> {
        if let Mutation::CreateNode { id, .. } = &mutation {
            if self.issued.contains(id) {
                return Err(TreeError::DuplicateId(id.clone()));
            }
        }
        let record = self.policy.records(&mutation);
        let created = match &mutation {
            Mutation::CreateNode { id, .. } => Some(id.clone()),
            _ => None,
        };
        let next = apply(&self.document, mutation)?;
        if let Some(id) = created {
            self.issued.insert(id);
        }
        self.commit(next, record);
        Ok(())
    }

    /// Apply several mutations as a single history entry. All or nothing.
    pub fn apply_batch(&mut self, mutations: Vec<Mutation>) -> Result<(), TreeError> {
        if mutations.is_empty() {
            return Ok(());
        }
        let mut created = Vec::new();
        for mutation in &mutations {
            if let Mutation::CreateNode { id, .. } = mutation {
                if self.issued.contains(id) || created.contains(id) {
                    return Err(TreeError::DuplicateId(id.clone()));
                }
                created.push(id.clone());
            }
        }
        let next = apply_all(&self.document, mutations)?;
        self.issued.extend(created);
        self.commit(next, true);
        Ok(())
    }

    /// Re-bind stale snapshots to `live`, as one undoable step.
    ///
    /// Returns `true` when anything changed.
    pub fn sync(&mut self, live: &LiveData) -> Result<bool, TreeError> {
        let repairs = plan_repairs(&self.document, live)?;
        if repairs.is_empty() {
            return Ok(false);
        }
        self.apply_batch(repairs)?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step back one history entry. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.document, previous);
        self.redo_stack.push(current);
        self.fix_selection();
        true
    }

    /// Step forward one history entry. Returns `false` when there is none.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.document, next);
        self.undo_stack.push(current);
        self.fix_selection();
        true
    }

    /// Any change, recorded or not, invalidates the redo stack: its entries
    /// were taken before the change and replaying one would drop it.
    fn commit(&mut self, next: Document, record: bool) {
        let previous = std::mem::replace(&mut self.document, next);
        self.redo_stack.clear();
        if record && self.policy.limit > 0 {
            self.undo_stack.push(previous);
            if self.undo_stack.len() > self.policy.limit {
                let excess = self.undo_stack.len() - self.policy.limit;
                self.undo_stack.drain(..excess);
            }
        }
        self.fix_selection();
    }

    /// Never leave the selection pointing at a node that no longer exists.
    fn fix_selection(&mut self) {
        if let Some(id) = &self.selection {
            if !self.document.contains(id) {
                self.selection = None;
            }
        }
    }
}
