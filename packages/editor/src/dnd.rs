//! # Drag/Drop Intent Mapper
//!
//! Translates a drag source (palette item or existing node) and a drop
//! target (blank slot or existing node) into a [`Mutation`].
//!
//! The mapper is deliberately permissive: it resolves positions from the
//! current tree when it can, but a target that vanished mid-drag still
//! yields an intent. Validation inside the reducer is the defense of
//! record, so a stale intent degrades to a rejected no-op.

use mosaic_document::{child_index, find_by_id, find_parent, ElementSource, Node};
use serde::{Deserialize, Serialize};

use crate::mutations::Mutation;

/// What is being dragged, discriminated by `dragType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dragType")]
pub enum DragPayload {
    /// Instantiate from the palette.
    #[serde(rename = "source")]
    Source { source: ElementSource },

    /// Move an existing node.
    #[serde(rename = "element")]
    Element { id: String },
}

/// Where it is being dropped, discriminated by `dropType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dropType")]
pub enum DropTarget {
    /// An empty slot under a known parent.
    #[serde(rename = "blank")]
    Blank {
        #[serde(rename = "parentId")]
        parent_id: String,
    },

    /// Onto or into an existing node.
    #[serde(rename = "existed-element")]
    ExistedElement { id: String },
}

/// Map a completed drag gesture to a mutation intent.
///
/// Returns `None` only for gestures that are no-ops by definition
/// (dropping a node onto itself).
pub fn map_drop(tree: &Node, drag: &DragPayload, drop: &DropTarget) -> Option<Mutation> {
    match (drag, drop) {
        (DragPayload::Source { source }, DropTarget::Blank { parent_id }) => {
            Some(Mutation::InsertFromSource {
                source: source.clone(),
                parent_id: parent_id.clone(),
                index: None,
            })
        }

        (DragPayload::Source { source }, DropTarget::ExistedElement { id }) => {
            let (parent_id, index) = resolve_target(tree, id);
            Some(Mutation::InsertFromSource {
                source: source.clone(),
                parent_id,
                index,
            })
        }

        (DragPayload::Element { id }, DropTarget::Blank { parent_id }) => Some(Mutation::MoveNode {
            node_id: id.clone(),
            new_parent_id: parent_id.clone(),
            index: None,
        }),

        (DragPayload::Element { id }, DropTarget::ExistedElement { id: target_id }) => {
            if id == target_id {
                // Self-drop is a no-op, not an error.
                return None;
            }
            let (new_parent_id, index) = resolve_target(tree, target_id);
            Some(Mutation::MoveNode {
                node_id: id.clone(),
                new_parent_id,
                index,
            })
        }
    }
}

/// Resolve a drop on an existing node to `(parent_id, index)`.
///
/// A target that accepts children becomes the parent itself (append).
/// Otherwise the drop lands next to the target, just after it, under the
/// target's own parent. Unresolvable ids pass through untouched for the
/// reducer to reject.
fn resolve_target(tree: &Node, target_id: &str) -> (String, Option<usize>) {
    let Some(target) = find_by_id(tree, target_id) else {
        return (target_id.to_string(), None);
    };

    if target.data.accepts_children() {
        return (target.id.clone(), None);
    }

    match find_parent(tree, target_id) {
        Some(parent) => {
            let index = child_index(parent, target_id).map(|i| i + 1);
            (parent.id.clone(), index)
        }
        None => (target_id.to_string(), None),
    }
}
