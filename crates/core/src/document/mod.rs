//! The editable menu document: a tree of typed blocks.
//!
//! - [`node`]: node ids, nodes, and the [`Document`] container with its
//!   structural invariants.
//! - [`block`]: block kinds, their capability rules, and typed props.
//! - [`mutation`]: the pure reducer applying a [`Mutation`] to a document.
//! - [`editor`]: an editing session with undo/redo history and selection.
//! - [`codec`]: conversion to and from the stored `serial_data` blob.
//! - [`render`]: the order in which a renderer visits blocks.

pub mod block;
pub mod codec;
pub mod editor;
pub mod error;
pub mod mutation;
pub mod node;
pub mod render;

pub use block::{Block, BlockKind, BlockRules, PropsPatch};
pub use codec::{deserialize, deserialize_or_template, serialize, CodecError, LoadedDocument};
pub use editor::{Editor, HistoryPolicy};
pub use error::TreeError;
pub use mutation::{apply, apply_all, Mutation};
pub use node::{Document, DocumentNode, NodeCustom, NodeId, ROOT_ID};
pub use render::{render_order, RenderEntry, RenderMode};
