//! Conversion between [`Document`] and the stored `serial_data` string.
//!
//! The stored form is a JSON object keyed by node id, zlib-compressed, then
//! base64-encoded. Each value looks like:
//!
//! ```text
//! {
//!   "type": { "resolvedName": "Category" },
//!   "isCanvas": true,
//!   "props": { ... },
//!   "displayName": "Category",
//!   "custom": { "displayName": "Starters" },
//!   "hidden": false,
//!   "nodes": ["child-a", "child-b"],
//!   "linkedNodes": {},
//!   "parent": "ROOT"
//! }
//! ```

use std::collections::BTreeMap;
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::block::{Block, BlockKind};
use super::node::{Document, DocumentNode, NodeCustom, NodeId};

/// Upper bound on the decompressed JSON size.
pub const MAX_DOCUMENT_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The blob could not be decoded, decompressed, parsed, or describes an
    /// inconsistent tree.
    #[error("Corrupt document: {0}")]
    Corrupt(String),

    #[error("Failed to encode document: {0}")]
    Encode(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedType {
    resolved_name: BlockKind,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedNode {
    #[serde(rename = "type")]
    node_type: SerializedType,
    #[serde(default)]
    is_canvas: bool,
    #[serde(default)]
    props: Value,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    custom: NodeCustom,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    nodes: Vec<NodeId>,
    #[serde(default)]
    linked_nodes: BTreeMap<String, NodeId>,
    #[serde(default)]
    parent: Option<NodeId>,
}

/// Flatten a document into its JSON object form.
pub fn to_json(document: &Document) -> Result<Value, CodecError> {
    let mut out = serde_json::Map::new();
    for node in document.nodes() {
        let kind = node.kind();
        let props = node
            .block
            .props_map()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        let serialized = SerializedNode {
            node_type: SerializedType {
                resolved_name: kind,
            },
            is_canvas: kind.rules().is_canvas,
            props: Value::Object(props),
            display_name: kind.as_str().to_string(),
            custom: node.custom.clone(),
            hidden: node.hidden,
            nodes: node.children.clone(),
            linked_nodes: BTreeMap::new(),
            parent: node.parent.clone(),
        };
        let value =
            serde_json::to_value(serialized).map_err(|e| CodecError::Encode(e.to_string()))?;
        out.insert(node.id.to_string(), value);
    }
    Ok(Value::Object(out))
}

/// Rebuild a document from its JSON object form.
pub fn from_json(value: Value) -> Result<Document, CodecError> {
    let raw: BTreeMap<NodeId, SerializedNode> =
        serde_json::from_value(value).map_err(|e| CodecError::Corrupt(e.to_string()))?;

    let mut nodes = BTreeMap::new();
    for (id, serialized) in raw {
        let kind = serialized.node_type.resolved_name;
        let block = Block::from_parts(kind, serialized.props)
            .map_err(|e| CodecError::Corrupt(format!("node {id}: {e}")))?;
        let node = DocumentNode {
            id: id.clone(),
            block,
            parent: serialized.parent,
            children: serialized.nodes,
            custom: serialized.custom,
            hidden: serialized.hidden,
        };
        nodes.insert(id, node);
    }

    Document::from_nodes(nodes).map_err(|e| CodecError::Corrupt(e.to_string()))
}

/// Encode a document as a compressed, base64 `serial_data` string.
pub fn serialize(document: &Document) -> Result<String, CodecError> {
    let json = to_json(document)?;
    let bytes = serde_json::to_vec(&json).map_err(|e| CodecError::Encode(e.to_string()))?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&bytes)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(STANDARD.encode(compressed))
}

/// Decode a `serial_data` string back into a document.
pub fn deserialize(blob: &str) -> Result<Document, CodecError> {
    let compressed = STANDARD
        .decode(blob.trim())
        .map_err(|e| CodecError::Corrupt(format!("base64: {e}")))?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .take(MAX_DOCUMENT_BYTES + 1)
        .read_to_end(&mut json)
        .map_err(|e| CodecError::Corrupt(format!("decompress: {e}")))?;
    if json.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(CodecError::Corrupt(format!(
            "document exceeds {MAX_DOCUMENT_BYTES} bytes"
        )));
    }

    let value: Value =
        serde_json::from_slice(&json).map_err(|e| CodecError::Corrupt(format!("json: {e}")))?;
    from_json(value)
}

/// Outcome of loading a stored document with template fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Document,
    /// `true` when the stored blob was missing or corrupt and the template
    /// was used instead. The stored blob itself is left alone.
    pub recovered: bool,
    /// Why the stored blob was rejected, if it was.
    pub error: Option<String>,
}

/// Decode `blob`, falling back to [`Document::template`] when there is no
/// blob or it is corrupt.
pub fn deserialize_or_template(blob: Option<&str>) -> LoadedDocument {
    match blob.filter(|b| !b.trim().is_empty()) {
        None => LoadedDocument {
            document: Document::template(),
            recovered: false,
            error: None,
        },
        Some(blob) => match deserialize(blob) {
            Ok(document) => LoadedDocument {
                document,
                recovered: false,
                error: None,
            },
            Err(e) => LoadedDocument {
                document: Document::template(),
                recovered: true,
                error: Some(e.to_string()),
            },
        },
    }
}
