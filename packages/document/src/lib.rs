//! # Mosaic Document
//!
//! Tree data model for the Mosaic layout editor.
//!
//! A document is a rooted, ordered hierarchy of [`Node`]s. Every node owns a
//! stable string id, a tagged [`ElementData`] payload, and its children
//! (exclusive ownership: a child belongs to exactly one parent).
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Node tree + identity + queries    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations + reducer + drag/drop     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Structural edits never mutate a tree in place. [`replace_node`] and
//! [`detach_node`] rebuild the path from the root down to the touched node
//! and return a new tree, so previous snapshots stay valid for undo and
//! diffing.

mod id_generator;
mod node;
mod source;
mod tree;

pub use id_generator::IdGenerator;
pub use node::{ElementData, ElementKind, FlexDirection, Node};
pub use source::ElementSource;
pub use tree::{
    child_index, collect_ids, contains, detach_node, find_by_id, find_parent, grid_slots,
    insert_child, replace_node, GridSlot, TreeError,
};
