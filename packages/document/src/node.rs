use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id_generator::IdGenerator;

/// A single node in the layout tree.
///
/// `id` is assigned at creation and never changes. Children are ordered and
/// exclusively owned: moving a node always detaches it from its old parent
/// before it is inserted anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub data: ElementData,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with a freshly allocated id and no children.
    pub fn new(data: ElementData, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.new_id(),
            data,
            children: Vec::new(),
        }
    }

    /// Create a node with an explicit id (snapshots, tests).
    pub fn with_id(id: impl Into<String>, data: ElementData) -> Self {
        Self {
            id: id.into(),
            data,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }
}

/// Flex container direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Row,
    Column,
}

/// Element payload, discriminated by `elementType` on the wire.
///
/// The tag decides which structural fields exist and which children are
/// permitted. `root`, `grid`, `grid-area` and `flex` are layout elements;
/// everything else is content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "elementType")]
pub enum ElementData {
    #[serde(rename = "root")]
    Root,

    #[serde(rename = "grid")]
    Grid {
        rows: Vec<String>,
        columns: Vec<String>,
        /// Row-major matrix of slot names. A name spanning several cells
        /// denotes one rectangular area, CSS-grid style.
        areas: Vec<Vec<String>>,
    },

    /// Occupies one named slot of its parent grid.
    #[serde(rename = "grid-area")]
    GridArea {
        #[serde(rename = "gridArea")]
        grid_area: String,
    },

    #[serde(rename = "flex")]
    Flex { direction: FlexDirection },

    /// Opaque style bag, owned by the styling system.
    #[serde(rename = "style")]
    Style { style: serde_json::Value },

    #[serde(rename = "text")]
    Text { value: String },

    #[serde(rename = "image")]
    Image { src: String },

    /// Rich-content blob edited by the external wysiwyg sub-editor.
    #[serde(rename = "wysiwyg")]
    Wysiwyg { data: serde_json::Value },

    #[serde(rename = "code")]
    Code {
        name: String,
        files: BTreeMap<String, String>,
    },
}

impl ElementData {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementData::Root => ElementKind::Root,
            ElementData::Grid { .. } => ElementKind::Grid,
            ElementData::GridArea { .. } => ElementKind::GridArea,
            ElementData::Flex { .. } => ElementKind::Flex,
            ElementData::Style { .. } => ElementKind::Style,
            ElementData::Text { .. } => ElementKind::Text,
            ElementData::Image { .. } => ElementKind::Image,
            ElementData::Wysiwyg { .. } => ElementKind::Wysiwyg,
            ElementData::Code { .. } => ElementKind::Code,
        }
    }

    /// Whether this element may hold children at all. Grid parents impose
    /// the further constraint that children are matching `grid-area` nodes.
    pub fn accepts_children(&self) -> bool {
        self.kind().is_layout()
    }

    /// Flattened slot names of a grid, deduplicated preserving first
    /// occurrence. `None` for non-grid elements.
    pub fn grid_area_names(&self) -> Option<Vec<&str>> {
        match self {
            ElementData::Grid { areas, .. } => {
                let mut names: Vec<&str> = Vec::new();
                for row in areas {
                    for name in row {
                        if !names.contains(&name.as_str()) {
                            names.push(name);
                        }
                    }
                }
                Some(names)
            }
            _ => None,
        }
    }
}

/// Element discriminant, mirroring the `elementType` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Root,
    Grid,
    GridArea,
    Flex,
    Style,
    Text,
    Image,
    Wysiwyg,
    Code,
}

impl ElementKind {
    /// Layout elements compose structure; their headers and controls are
    /// shown in LAYOUT mode.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            ElementKind::Root | ElementKind::Grid | ElementKind::GridArea | ElementKind::Flex
        )
    }

    /// Content elements carry user-visible payload; shown in ELEMENT mode.
    pub fn is_content(self) -> bool {
        !self.is_layout()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Root => "root",
            ElementKind::Grid => "grid",
            ElementKind::GridArea => "grid-area",
            ElementKind::Flex => "flex",
            ElementKind::Style => "style",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Wysiwyg => "wysiwyg",
            ElementKind::Code => "code",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
