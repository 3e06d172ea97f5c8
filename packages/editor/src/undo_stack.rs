//! # Undo/Redo Stack
//!
//! Tracks tree history as whole snapshots. Mutations rebuild only the path
//! they touch, so keeping prior trees around is cheap at UI scale and undo
//! is a plain swap rather than an inverse-operation replay.

use mosaic_document::Node;

/// Snapshot-based undo/redo stack for the editor.
#[derive(Debug, Default)]
pub struct UndoStack {
    /// Trees as they were *before* each recorded mutation (most recent last)
    undo_stack: Vec<Node>,

    /// Trees undone away from (most recent last)
    redo_stack: Vec<Node>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the pre-mutation snapshot. New history invalidates any
    /// previously undone future.
    pub fn record(&mut self, before: Node) {
        self.undo_stack.push(before);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back, exchanging `current` for the previous snapshot.
    pub fn undo(&mut self, current: &Node) -> Option<Node> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Step forward, exchanging `current` for the previously undone tree.
    pub fn redo(&mut self, current: &Node) -> Option<Node> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
