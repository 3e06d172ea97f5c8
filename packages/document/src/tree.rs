//! Structural queries and path-copying edits over a [`Node`] tree.
//!
//! Lookups are depth-first and O(size); target trees are UI-scale, not
//! data-scale. Edits rebuild the path from the root to the touched node and
//! return a new tree, leaving the input untouched.

use std::collections::HashSet;

use thiserror::Error;

use crate::node::{ElementData, Node};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

/// Depth-first lookup by id.
pub fn find_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_by_id(child, id))
}

/// Direct parent of `id`. `None` if `id` is the root or absent.
pub fn find_parent<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.children.iter().any(|c| c.id == id) {
        return Some(root);
    }
    root.children
        .iter()
        .find_map(|child| find_parent(child, id))
}

/// Whether `id` occurs anywhere in `root`'s subtree, `root` included.
pub fn contains(root: &Node, id: &str) -> bool {
    find_by_id(root, id).is_some()
}

/// Position of `id` among `parent`'s direct children.
pub fn child_index(parent: &Node, id: &str) -> Option<usize> {
    parent.children.iter().position(|c| c.id == id)
}

/// All ids in the tree, depth-first.
pub fn collect_ids(root: &Node) -> HashSet<String> {
    let mut ids = HashSet::new();
    collect_into(root, &mut ids);
    ids
}

fn collect_into(node: &Node, ids: &mut HashSet<String>) {
    ids.insert(node.id.clone());
    for child in &node.children {
        collect_into(child, ids);
    }
}

/// Replace the node matching `id` with `update(old)` and rebuild every
/// ancestor on the path from the root. The input tree is left untouched.
pub fn replace_node<F>(root: &Node, id: &str, update: F) -> Result<Node, TreeError>
where
    F: FnOnce(Node) -> Node,
{
    let mut update = Some(update);
    replace_in(root, id, &mut update).ok_or_else(|| TreeError::NodeNotFound(id.to_string()))
}

fn replace_in<F>(node: &Node, id: &str, update: &mut Option<F>) -> Option<Node>
where
    F: FnOnce(Node) -> Node,
{
    if node.id == id {
        let update = update.take()?;
        return Some(update(node.clone()));
    }
    for (i, child) in node.children.iter().enumerate() {
        if let Some(replaced) = replace_in(child, id, update) {
            let mut copy = node.clone();
            copy.children[i] = replaced;
            return Some(copy);
        }
    }
    None
}

/// Remove the subtree rooted at `id`, returning the new tree and the
/// detached subtree. Fails with [`TreeError::NodeNotFound`] when `id` is
/// absent or names the root itself (the root has no parent to detach from).
pub fn detach_node(root: &Node, id: &str) -> Result<(Node, Node), TreeError> {
    detach_in(root, id).ok_or_else(|| TreeError::NodeNotFound(id.to_string()))
}

fn detach_in(node: &Node, id: &str) -> Option<(Node, Node)> {
    if let Some(pos) = node.children.iter().position(|c| c.id == id) {
        let mut copy = node.clone();
        let removed = copy.children.remove(pos);
        return Some((copy, removed));
    }
    for (i, child) in node.children.iter().enumerate() {
        if let Some((rebuilt, removed)) = detach_in(child, id) {
            let mut copy = node.clone();
            copy.children[i] = rebuilt;
            return Some((copy, removed));
        }
    }
    None
}

/// Insert `child` into the children of `parent_id`. Appends when `index` is
/// `None`; an index past the end clamps to an append.
pub fn insert_child(
    root: &Node,
    parent_id: &str,
    index: Option<usize>,
    child: Node,
) -> Result<Node, TreeError> {
    replace_node(root, parent_id, |mut parent| {
        let at = index
            .unwrap_or(parent.children.len())
            .min(parent.children.len());
        parent.children.insert(at, child);
        parent
    })
}

/// One named slot of a grid, derived from its `areas` matrix.
///
/// A slot with no bound node is present-but-empty; it renders as a blank
/// drop affordance, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSlot<'a> {
    pub name: &'a str,
    pub node: Option<&'a Node>,
}

/// Slot listing for a grid node. Slots come from the flattened `areas`
/// matrix (first occurrence wins for repeated names); each slot binds the
/// first `grid-area` child whose `gridArea` matches. Empty for non-grids.
pub fn grid_slots(grid: &Node) -> Vec<GridSlot<'_>> {
    let Some(names) = grid.data.grid_area_names() else {
        return Vec::new();
    };

    names
        .into_iter()
        .map(|name| GridSlot {
            name,
            node: grid.children.iter().find(|c| {
                matches!(
                    &c.data,
                    ElementData::GridArea { grid_area } if grid_area == name
                )
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FlexDirection;

    fn sample_tree() -> Node {
        let mut root = Node::with_id("root", ElementData::Root);
        let mut flex = Node::with_id(
            "flex-1",
            ElementData::Flex {
                direction: FlexDirection::Row,
            },
        );
        flex.children.push(Node::with_id(
            "text-1",
            ElementData::Text {
                value: "hello".to_string(),
            },
        ));
        flex.children.push(Node::with_id(
            "image-1",
            ElementData::Image {
                src: "/cat.png".to_string(),
            },
        ));
        root.children.push(flex);
        root
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample_tree();
        assert_eq!(find_by_id(&tree, "root").unwrap().id, "root");
        assert_eq!(find_by_id(&tree, "text-1").unwrap().id, "text-1");
        assert!(find_by_id(&tree, "missing").is_none());
    }

    #[test]
    fn test_find_parent() {
        let tree = sample_tree();
        assert_eq!(find_parent(&tree, "text-1").unwrap().id, "flex-1");
        assert_eq!(find_parent(&tree, "flex-1").unwrap().id, "root");
        assert!(find_parent(&tree, "root").is_none());
        assert!(find_parent(&tree, "missing").is_none());
    }

    #[test]
    fn test_replace_node_keeps_old_snapshot() {
        let tree = sample_tree();
        let updated = replace_node(&tree, "text-1", |mut n| {
            n.data = ElementData::Text {
                value: "changed".to_string(),
            };
            n
        })
        .unwrap();

        // New tree carries the change.
        assert_eq!(
            find_by_id(&updated, "text-1").unwrap().data,
            ElementData::Text {
                value: "changed".to_string()
            }
        );
        // Old snapshot is untouched.
        assert_eq!(
            find_by_id(&tree, "text-1").unwrap().data,
            ElementData::Text {
                value: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_replace_node_missing_id() {
        let tree = sample_tree();
        let err = replace_node(&tree, "missing", |n| n).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound("missing".to_string()));
    }

    #[test]
    fn test_detach_node() {
        let tree = sample_tree();
        let (rebuilt, removed) = detach_node(&tree, "text-1").unwrap();

        assert_eq!(removed.id, "text-1");
        assert!(find_by_id(&rebuilt, "text-1").is_none());
        assert_eq!(find_by_id(&rebuilt, "flex-1").unwrap().children.len(), 1);
        // Original untouched.
        assert_eq!(find_by_id(&tree, "flex-1").unwrap().children.len(), 2);
    }

    #[test]
    fn test_detach_root_is_not_found() {
        let tree = sample_tree();
        assert!(detach_node(&tree, "root").is_err());
    }

    #[test]
    fn test_insert_child_appends_and_clamps() {
        let tree = sample_tree();
        let child = Node::with_id(
            "text-2",
            ElementData::Text {
                value: "more".to_string(),
            },
        );

        let appended = insert_child(&tree, "flex-1", None, child.clone()).unwrap();
        assert_eq!(child_index(find_by_id(&appended, "flex-1").unwrap(), "text-2"), Some(2));

        let clamped = insert_child(&tree, "flex-1", Some(99), child.clone()).unwrap();
        assert_eq!(child_index(find_by_id(&clamped, "flex-1").unwrap(), "text-2"), Some(2));

        let front = insert_child(&tree, "flex-1", Some(0), child).unwrap();
        assert_eq!(child_index(find_by_id(&front, "flex-1").unwrap(), "text-2"), Some(0));
    }

    #[test]
    fn test_collect_ids() {
        let tree = sample_tree();
        let ids = collect_ids(&tree);
        assert_eq!(ids.len(), 4);
        assert!(ids.contains("root"));
        assert!(ids.contains("image-1"));
    }

    #[test]
    fn test_grid_slots_reports_empty_slots() {
        let mut grid = Node::with_id(
            "grid-1",
            ElementData::Grid {
                rows: vec!["1fr".into()],
                columns: vec!["1fr".into(), "1fr".into()],
                areas: vec![vec!["a".into(), "b".into()]],
            },
        );
        let mut area = Node::with_id(
            "area-a",
            ElementData::GridArea {
                grid_area: "a".to_string(),
            },
        );
        area.children.push(Node::with_id(
            "text-1",
            ElementData::Text {
                value: "x".to_string(),
            },
        ));
        grid.children.push(area);

        let slots = grid_slots(&grid);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].name, "a");
        assert_eq!(slots[0].node.unwrap().id, "area-a");
        assert_eq!(slots[1].name, "b");
        assert!(slots[1].node.is_none());
    }

    #[test]
    fn test_grid_slots_on_non_grid_is_empty() {
        let tree = sample_tree();
        assert!(grid_slots(&tree).is_empty());
    }

    #[test]
    fn test_grid_slots_first_match_wins() {
        let mut grid = Node::with_id(
            "grid-1",
            ElementData::Grid {
                rows: vec!["1fr".into()],
                columns: vec!["1fr".into()],
                areas: vec![vec!["a".into()]],
            },
        );
        grid.children.push(Node::with_id(
            "area-first",
            ElementData::GridArea {
                grid_area: "a".to_string(),
            },
        ));
        grid.children.push(Node::with_id(
            "area-second",
            ElementData::GridArea {
                grid_area: "a".to_string(),
            },
        ));

        let slots = grid_slots(&grid);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].node.unwrap().id, "area-first");
    }
}
