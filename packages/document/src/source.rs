use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id_generator::IdGenerator;
use crate::node::{ElementData, FlexDirection, Node};

/// Palette item: an immutable template from which new nodes are
/// instantiated. Discriminated by `sourceType` on the wire. The catalog is
/// supplied once at editor construction and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sourceType")]
pub enum ElementSource {
    #[serde(rename = "text")]
    Text {
        #[serde(rename = "displayName")]
        display_name: String,
        value: String,
    },

    #[serde(rename = "image")]
    Image {
        #[serde(rename = "displayName")]
        display_name: String,
        src: String,
    },

    #[serde(rename = "grid")]
    Grid {
        #[serde(rename = "displayName")]
        display_name: String,
        rows: Vec<String>,
        columns: Vec<String>,
        areas: Vec<Vec<String>>,
    },

    #[serde(rename = "flex")]
    Flex {
        #[serde(rename = "displayName")]
        display_name: String,
        direction: FlexDirection,
    },

    #[serde(rename = "wysiwyg")]
    Wysiwyg {
        #[serde(rename = "displayName")]
        display_name: String,
        data: serde_json::Value,
    },

    #[serde(rename = "code")]
    Code {
        #[serde(rename = "displayName")]
        display_name: String,
        name: String,
        files: BTreeMap<String, String>,
    },
}

impl ElementSource {
    pub fn display_name(&self) -> &str {
        match self {
            ElementSource::Text { display_name, .. } => display_name,
            ElementSource::Image { display_name, .. } => display_name,
            ElementSource::Grid { display_name, .. } => display_name,
            ElementSource::Flex { display_name, .. } => display_name,
            ElementSource::Wysiwyg { display_name, .. } => display_name,
            ElementSource::Code { display_name, .. } => display_name,
        }
    }

    /// Build a fresh node from this template.
    ///
    /// Grid sources materialize one empty `grid-area` child per unique slot
    /// name so every slot is immediately droppable; a slot whose child is
    /// later deleted stays valid and renders empty.
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Node {
        match self {
            ElementSource::Text { value, .. } => Node::new(
                ElementData::Text {
                    value: value.clone(),
                },
                ids,
            ),
            ElementSource::Image { src, .. } => {
                Node::new(ElementData::Image { src: src.clone() }, ids)
            }
            ElementSource::Grid {
                rows,
                columns,
                areas,
                ..
            } => {
                let mut grid = Node::new(
                    ElementData::Grid {
                        rows: rows.clone(),
                        columns: columns.clone(),
                        areas: areas.clone(),
                    },
                    ids,
                );
                if let Some(names) = grid.data.grid_area_names() {
                    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
                    for name in names {
                        grid.children
                            .push(Node::new(ElementData::GridArea { grid_area: name }, ids));
                    }
                }
                grid
            }
            ElementSource::Flex { direction, .. } => Node::new(
                ElementData::Flex {
                    direction: *direction,
                },
                ids,
            ),
            ElementSource::Wysiwyg { data, .. } => {
                Node::new(ElementData::Wysiwyg { data: data.clone() }, ids)
            }
            ElementSource::Code { name, files, .. } => Node::new(
                ElementData::Code {
                    name: name.clone(),
                    files: files.clone(),
                },
                ids,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementKind;
    use crate::tree::grid_slots;

    #[test]
    fn test_text_source_instantiates_leaf() {
        let mut ids = IdGenerator::new("source-test");
        let source = ElementSource::Text {
            display_name: "Paragraph".to_string(),
            value: "lorem".to_string(),
        };

        let node = source.instantiate(&mut ids);
        assert_eq!(node.kind(), ElementKind::Text);
        assert!(node.children.is_empty());
        assert_eq!(
            node.data,
            ElementData::Text {
                value: "lorem".to_string()
            }
        );
    }

    #[test]
    fn test_grid_source_materializes_unique_slots() {
        let mut ids = IdGenerator::new("source-test");
        let source = ElementSource::Grid {
            display_name: "Two columns".to_string(),
            rows: vec!["1fr".into(), "1fr".into()],
            columns: vec!["1fr".into(), "1fr".into()],
            areas: vec![
                vec!["main".into(), "side".into()],
                vec!["main".into(), "side".into()],
            ],
        };

        let grid = source.instantiate(&mut ids);
        assert_eq!(grid.children.len(), 2);
        assert!(grid
            .children
            .iter()
            .all(|c| c.kind() == ElementKind::GridArea));

        let slots = grid_slots(&grid);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.node.is_some()));
    }

    #[test]
    fn test_source_wire_format() {
        let source = ElementSource::Flex {
            display_name: "Row".to_string(),
            direction: FlexDirection::Row,
        };

        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["sourceType"], "flex");
        assert_eq!(json["displayName"], "Row");
        assert_eq!(json["direction"], "row");

        let decoded: ElementSource = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, source);
    }
}
