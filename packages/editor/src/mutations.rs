//! # Tree Mutations
//!
//! High-level semantic operations on a Mosaic layout tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Validated**: All mutations validate structural constraints
//! 3. **Non-destructive**: Apply returns a new tree; the input snapshot
//!    stays valid
//! 4. **Total at the boundary**: A rejected mutation is an error value,
//!    never a panic
//!
//! ## Mutation Semantics
//!
//! ### InsertFromSource
//! - Instantiates a palette template under an existing parent
//! - Parent must accept children; grids only admit matching `grid-area`s
//! - Generated ids are re-rolled until unique within the tree
//!
//! ### MoveNode
//! - Atomic relocation to a new parent at index
//! - Fails if it would make a node its own ancestor
//! - The root never moves
//!
//! ### DeleteNode
//! - Removes node and all descendants
//! - Emptying a flex or grid-area is legal; the root never goes away
//!
//! ### UpdateNodeData
//! - Replaces the payload of a node with same-kind data (no type punning)
//! - Shrinking a grid's `areas` prunes children bound to vanished slots

use mosaic_document::{
    collect_ids, contains, detach_node, find_by_id, find_parent, insert_child, replace_node,
    ElementData, ElementKind, ElementSource, IdGenerator, Node,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Instantiate a palette source under `parent_id` at `index`
    /// (append when unspecified)
    InsertFromSource {
        source: ElementSource,
        parent_id: String,
        index: Option<usize>,
    },

    /// Move an existing node to a new parent at index
    MoveNode {
        node_id: String,
        new_parent_id: String,
        index: Option<usize>,
    },

    /// Remove a node and its subtree
    DeleteNode { node_id: String },

    /// Replace a node's payload with same-kind data
    UpdateNodeData { node_id: String, data: ElementData },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Parent {parent_id} does not accept {child}: {reason}")]
    InvalidParent {
        parent_id: String,
        child: ElementKind,
        reason: String,
    },

    #[error("Move would make {0} its own ancestor")]
    CyclicMove(String),

    #[error("Update would change element type from {existing} to {incoming}")]
    TypeMismatch {
        existing: ElementKind,
        incoming: ElementKind,
    },

    #[error("The root node cannot be moved or deleted")]
    RootProtected,
}

impl Mutation {
    /// Validate without applying.
    pub fn validate(&self, tree: &Node) -> Result<(), MutationError> {
        match self {
            Mutation::InsertFromSource {
                source, parent_id, ..
            } => {
                let parent = find_by_id(tree, parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;

                check_parent_accepts(parent, source_kind(source), None)
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => {
                if node_id == &tree.id {
                    return Err(MutationError::RootProtected);
                }

                let node = find_by_id(tree, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

                // The new parent must exist outside the moved subtree,
                // otherwise the node would become its own ancestor.
                if contains(node, new_parent_id) {
                    return Err(MutationError::CyclicMove(node_id.clone()));
                }
                let parent = find_by_id(tree, new_parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.clone()))?;

                check_parent_accepts(parent, node.kind(), Some(node))
            }

            Mutation::DeleteNode { node_id } => {
                if node_id == &tree.id {
                    return Err(MutationError::RootProtected);
                }
                find_by_id(tree, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::UpdateNodeData { node_id, data } => {
                let node = find_by_id(tree, node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

                if node.kind() != data.kind() {
                    return Err(MutationError::TypeMismatch {
                        existing: node.kind(),
                        incoming: data.kind(),
                    });
                }

                // Renaming a grid-area must keep it bound to a declared,
                // unoccupied slot of the parent grid.
                if let ElementData::GridArea { grid_area } = data {
                    if let Some(parent) = find_parent(tree, node_id) {
                        if let Some(names) = parent.data.grid_area_names() {
                            if !names.contains(&grid_area.as_str()) {
                                return Err(MutationError::InvalidParent {
                                    parent_id: parent.id.clone(),
                                    child: ElementKind::GridArea,
                                    reason: format!("no slot named {:?}", grid_area),
                                });
                            }

                            let occupied = parent.children.iter().any(|c| {
                                c.id != *node_id
                                    && matches!(
                                        &c.data,
                                        ElementData::GridArea { grid_area: g } if g == grid_area
                                    )
                            });
                            if occupied {
                                return Err(MutationError::InvalidParent {
                                    parent_id: parent.id.clone(),
                                    child: ElementKind::GridArea,
                                    reason: format!("slot {:?} is already occupied", grid_area),
                                });
                            }
                        }
                    }
                }

                Ok(())
            }
        }
    }

    /// Validate and apply, returning the new tree. The input tree is left
    /// untouched.
    pub fn apply(&self, tree: &Node, ids: &mut IdGenerator) -> Result<Node, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::InsertFromSource {
                source,
                parent_id,
                index,
            } => {
                let node = instantiate_unique(source, tree, ids);
                insert_child(tree, parent_id, *index, node)
                    .map_err(|_| MutationError::ParentNotFound(parent_id.clone()))
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => {
                let (without, node) = detach_node(tree, node_id)
                    .map_err(|_| MutationError::NodeNotFound(node_id.clone()))?;
                insert_child(&without, new_parent_id, *index, node)
                    .map_err(|_| MutationError::ParentNotFound(new_parent_id.clone()))
            }

            Mutation::DeleteNode { node_id } => {
                let (without, _removed) = detach_node(tree, node_id)
                    .map_err(|_| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(without)
            }

            Mutation::UpdateNodeData { node_id, data } => {
                replace_node(tree, node_id, |mut node| {
                    node.data = data.clone();
                    prune_stale_grid_areas(&mut node);
                    node
                })
                .map_err(|_| MutationError::NodeNotFound(node_id.clone()))
            }
        }
    }

    /// Debug name of this mutation.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertFromSource { .. } => "InsertFromSource",
            Mutation::MoveNode { .. } => "MoveNode",
            Mutation::DeleteNode { .. } => "DeleteNode",
            Mutation::UpdateNodeData { .. } => "UpdateNodeData",
        }
    }
}

/// Element kind a source template instantiates to.
fn source_kind(source: &ElementSource) -> ElementKind {
    match source {
        ElementSource::Text { .. } => ElementKind::Text,
        ElementSource::Image { .. } => ElementKind::Image,
        ElementSource::Grid { .. } => ElementKind::Grid,
        ElementSource::Flex { .. } => ElementKind::Flex,
        ElementSource::Wysiwyg { .. } => ElementKind::Wysiwyg,
        ElementSource::Code { .. } => ElementKind::Code,
    }
}

/// Structural acceptance rules for a prospective child.
///
/// `moving` carries the node itself for MoveNode so a grid-area keeps its
/// claim on the slot it already occupies.
fn check_parent_accepts(
    parent: &Node,
    child: ElementKind,
    moving: Option<&Node>,
) -> Result<(), MutationError> {
    if !parent.data.accepts_children() {
        return Err(MutationError::InvalidParent {
            parent_id: parent.id.clone(),
            child,
            reason: format!("{} elements have no children", parent.kind()),
        });
    }

    // Grids only hold grid-area nodes bound to a declared, unoccupied slot.
    if let Some(names) = parent.data.grid_area_names() {
        let grid_area = match moving.map(|n| &n.data) {
            Some(ElementData::GridArea { grid_area }) => grid_area.clone(),
            _ => {
                return Err(MutationError::InvalidParent {
                    parent_id: parent.id.clone(),
                    child,
                    reason: "grids only admit grid-area children".to_string(),
                })
            }
        };

        if !names.contains(&grid_area.as_str()) {
            return Err(MutationError::InvalidParent {
                parent_id: parent.id.clone(),
                child,
                reason: format!("no slot named {:?}", grid_area),
            });
        }

        let occupied = parent.children.iter().any(|c| {
            moving.map(|m| m.id != c.id).unwrap_or(true)
                && matches!(&c.data, ElementData::GridArea { grid_area: g } if g == &grid_area)
        });
        if occupied {
            return Err(MutationError::InvalidParent {
                parent_id: parent.id.clone(),
                child,
                reason: format!("slot {:?} is already occupied", grid_area),
            });
        }
    }

    Ok(())
}

/// Instantiate a source, re-rolling generated ids that collide with ids
/// already present in the tree (possible when the initial snapshot came
/// from an earlier session).
fn instantiate_unique(source: &ElementSource, tree: &Node, ids: &mut IdGenerator) -> Node {
    let existing = collect_ids(tree);
    let mut node = source.instantiate(ids);
    while subtree_collides(&node, &existing) {
        node = source.instantiate(ids);
    }
    node
}

fn subtree_collides(node: &Node, existing: &std::collections::HashSet<String>) -> bool {
    existing.contains(&node.id) || node.children.iter().any(|c| subtree_collides(c, existing))
}

/// Drop grid-area children whose slot name no longer appears in the grid's
/// `areas` matrix. No-op for non-grids.
fn prune_stale_grid_areas(node: &mut Node) {
    let Some(names) = node.data.grid_area_names() else {
        return;
    };
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    node.children.retain(|c| match &c.data {
        ElementData::GridArea { grid_area } => names.iter().any(|n| n == grid_area),
        _ => true,
    });
}
