//! # Mosaic Editor
//!
//! Tree-state core of the Mosaic layout editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI events → drag/drop intent mapper         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: reducer + mutation protocol         │
//! │  - Validate and apply structural edits      │
//! │  - Edit-mode state machine                  │
//! │  - Undo/redo snapshots                      │
//! │  - onChange notification per mutation       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ rendering (external): read-only traversal   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is source of truth**: views are derived, read-only
//! 2. **One mutation entry point**: the reducer validates everything, even
//!    drops the UI should have prevented
//! 3. **No-op over crash**: malformed intents are rejected values, never
//!    panics
//! 4. **Snapshots stay valid**: mutations rebuild the touched path, so undo
//!    holds plain old trees
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mosaic_editor::{Editor, Mutation};
//!
//! let mut editor = Editor::new(initial_tree)
//!     .with_sources(sources)
//!     .on_change(|tree| println!("[changed] {}", tree.id));
//!
//! editor.apply(Mutation::InsertFromSource {
//!     source: text_source,
//!     parent_id: flex_id,
//!     index: None,
//! })?;
//!
//! let snapshot = editor.to_json()?;
//! ```

mod dnd;
mod editor;
mod mutations;
mod reducer;
mod undo_stack;

pub use dnd::{map_drop, DragPayload, DropTarget};
pub use editor::{Editor, OnChange};
pub use mutations::{Mutation, MutationError};
pub use reducer::{reduce, Action, EditMode, EditorState, Reduction};
pub use undo_stack::UndoStack;

// Re-export the document model for convenience
pub use mosaic_document::{ElementData, ElementKind, ElementSource, IdGenerator, Node};
