//! Block kinds and their typed props records.
//!
//! Each block kind owns a props struct. All props fields carry defaults so a
//! partially populated props object (as produced by older documents or a
//! fresh drop from the toolbox) still parses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::TreeError;
use crate::sync::snapshot::{CategorySnapshot, ItemSnapshot, LocationSnapshot, OrganizationSnapshot};

// ---------------------------------------------------------------------------
// Block kinds
// ---------------------------------------------------------------------------

/// Discriminator stored as `type.resolvedName` in the serialized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    Container,
    Header,
    Category,
    FeaturedItems,
    Item,
    Text,
    Location,
}

/// Structural capabilities of a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRules {
    /// Whether the block accepts child nodes.
    pub is_canvas: bool,
    /// Whether the block may be moved to another position or parent.
    pub can_drag: bool,
    /// Whether the block may be deleted.
    pub can_delete: bool,
}

impl BlockKind {
    /// All recognised block kinds.
    pub const ALL: &'static [BlockKind] = &[
        BlockKind::Container,
        BlockKind::Header,
        BlockKind::Category,
        BlockKind::FeaturedItems,
        BlockKind::Item,
        BlockKind::Text,
        BlockKind::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Header => "Header",
            Self::Category => "Category",
            Self::FeaturedItems => "FeaturedItems",
            Self::Item => "Item",
            Self::Text => "Text",
            Self::Location => "Location",
        }
    }

    pub fn rules(&self) -> BlockRules {
        match self {
            Self::Container => BlockRules {
                is_canvas: true,
                can_drag: true,
                can_delete: true,
            },
            // The header is pinned to the top of the menu.
            Self::Header => BlockRules {
                is_canvas: false,
                can_drag: false,
                can_delete: false,
            },
            Self::Category => BlockRules {
                is_canvas: true,
                can_drag: true,
                can_delete: true,
            },
            Self::FeaturedItems | Self::Item | Self::Text | Self::Location => BlockRules {
                is_canvas: false,
                can_drag: true,
                can_delete: true,
            },
        }
    }

    /// Whether a block of this kind may hold a `child` block directly.
    pub fn accepts_child(&self, child: BlockKind) -> bool {
        match self {
            Self::Container => true,
            Self::Category => child == Self::Item,
            _ => false,
        }
    }

    /// Kinds that are pinned in place: at most one per document.
    pub fn is_singleton(&self) -> bool {
        !self.rules().can_delete
    }

    /// Whether blocks of this kind embed a copy of live menu data.
    pub fn carries_snapshot(&self) -> bool {
        !matches!(self, Self::Container | Self::Text)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Props records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLayout {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerProps {
    pub background: Option<String>,
    pub padding: u16,
    pub gap: u16,
    pub flex_direction: FlexDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderProps {
    pub organization: Option<OrganizationSnapshot>,
    pub show_logo: bool,
    pub show_banner: bool,
    pub font_family: Option<String>,
    pub text_color: Option<String>,
    pub background: Option<String>,
}

impl Default for HeaderProps {
    fn default() -> Self {
        Self {
            organization: None,
            show_logo: true,
            show_banner: true,
            font_family: None,
            text_color: None,
            background: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryProps {
    pub data: Option<CategorySnapshot>,
    pub menu_items: Vec<ItemSnapshot>,
    pub layout: ItemLayout,
    pub show_descriptions: bool,
    pub show_prices: bool,
    pub heading_color: Option<String>,
}

impl Default for CategoryProps {
    fn default() -> Self {
        Self {
            data: None,
            menu_items: Vec::new(),
            layout: ItemLayout::List,
            show_descriptions: true,
            show_prices: true,
            heading_color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedItemsProps {
    pub items: Vec<ItemSnapshot>,
    pub title: Option<String>,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemProps {
    pub item: Option<ItemSnapshot>,
    pub show_image: bool,
    pub show_variants: bool,
}

impl Default for ItemProps {
    fn default() -> Self {
        Self {
            item: None,
            show_image: true,
            show_variants: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: u16,
    pub align: TextAlign,
    pub color: Option<String>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 16,
            align: TextAlign::Left,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationProps {
    pub location: Option<LocationSnapshot>,
    pub show_hours: bool,
    pub show_phone: bool,
}

impl Default for LocationProps {
    fn default() -> Self {
        Self {
            location: None,
            show_hours: true,
            show_phone: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A block's kind together with its props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum Block {
    Container(ContainerProps),
    Header(HeaderProps),
    Category(CategoryProps),
    FeaturedItems(FeaturedItemsProps),
    Item(ItemProps),
    Text(TextProps),
    Location(LocationProps),
}

/// Partial props update: top-level keys replace the block's keys.
pub type PropsPatch = Map<String, Value>;

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Container(_) => BlockKind::Container,
            Self::Header(_) => BlockKind::Header,
            Self::Category(_) => BlockKind::Category,
            Self::FeaturedItems(_) => BlockKind::FeaturedItems,
            Self::Item(_) => BlockKind::Item,
            Self::Text(_) => BlockKind::Text,
            Self::Location(_) => BlockKind::Location,
        }
    }

    /// A block of the given kind with default props.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Container => Self::Container(ContainerProps::default()),
            BlockKind::Header => Self::Header(HeaderProps::default()),
            BlockKind::Category => Self::Category(CategoryProps::default()),
            BlockKind::FeaturedItems => Self::FeaturedItems(FeaturedItemsProps::default()),
            BlockKind::Item => Self::Item(ItemProps::default()),
            BlockKind::Text => Self::Text(TextProps::default()),
            BlockKind::Location => Self::Location(LocationProps::default()),
        }
    }

    /// The props record as a JSON object.
    pub fn props_map(&self) -> Result<PropsPatch, TreeError> {
        let value = serde_json::to_value(self).map_err(|e| self.invalid(e))?;
        match value {
            Value::Object(mut obj) => match obj.remove("props") {
                Some(Value::Object(props)) => Ok(props),
                _ => Ok(Map::new()),
            },
            _ => Ok(Map::new()),
        }
    }

    /// Rebuild a block from its kind and a props value. `null` props mean
    /// "all defaults".
    pub fn from_parts(kind: BlockKind, props: Value) -> Result<Self, TreeError> {
        let props = match props {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let tagged = serde_json::json!({ "type": kind, "props": props });
        serde_json::from_value(tagged).map_err(|e| TreeError::InvalidProps {
            kind,
            message: e.to_string(),
        })
    }

    /// Shallow-merge `patch` into this block's props and re-validate the
    /// result against the typed record.
    pub fn merged(&self, patch: &PropsPatch) -> Result<Self, TreeError> {
        let mut props = self.props_map()?;
        for (key, value) in patch {
            props.insert(key.clone(), value.clone());
        }
        Self::from_parts(self.kind(), Value::Object(props))
    }

    fn invalid(&self, err: serde_json::Error) -> TreeError {
        TreeError::InvalidProps {
            kind: self.kind(),
            message: err.to_string(),
        }
    }
}
